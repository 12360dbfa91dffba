use psonet::community::{CommunityDetection, PsoNet};
use psonet::Network;
use std::collections::BTreeMap;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Two 6-cliques joined by a single bridge edge (5 - 6).
    let mut edges = Vec::new();
    for base in [0, 6] {
        for i in 0..6 {
            for j in (i + 1)..6 {
                edges.push((base + i, base + j));
            }
        }
    }
    edges.push((5, 6));
    let network = Network::from_edges(edges.iter().copied());

    let pso = PsoNet::new()
        .with_particles(30)
        .with_generations(100)
        .with_seed(7);

    let outcome = pso.run_with_progress(&network, |progress| {
        if progress.generation % 20 == 0 {
            println!(
                "generation {:>3}: Q = {:.4} ({} communities)",
                progress.generation,
                progress.best_modularity,
                progress.partition.community_count()
            );
        }
    })?;

    println!(
        "best Q = {:.4} (delta {:.4}) in {:.2?}",
        outcome.modularity,
        outcome.delta_modularity(),
        outcome.elapsed
    );
    for (community, members) in outcome.partition.communities() {
        println!("  community {community}: {members:?}");
    }

    // Same detector through the petgraph-facing trait.
    let mut graph = petgraph::graph::UnGraph::<(), ()>::new_undirected();
    let nodes: Vec<_> = (0..12).map(|_| graph.add_node(())).collect();
    for &(u, v) in &edges {
        let _ = graph.add_edge(nodes[u], nodes[v], ());
    }
    let labels = pso.detect(&graph)?;

    let mut by_comm: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for (idx, comm) in labels.iter().enumerate() {
        by_comm.entry(*comm).or_default().push(idx);
    }
    println!("petgraph labels: {} communities", by_comm.len());

    Ok(())
}
