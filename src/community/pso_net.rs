//! PSO-Net: swarm-guided genetic search over locus-based encodings.
//!
//! ## The Algorithm
//!
//! A population of particles (encodings) is evolved for a fixed number of
//! generations. Each particle remembers its personal best; the swarm shares one
//! global best. Per generation, every particle:
//!
//! 1. Crosses over with its personal best and keeps the fitter child.
//! 2. Crosses that child with the global best and keeps the fitter child.
//! 3. Mutates one locus of the result, which becomes the particle's new position.
//! 4. Replaces its personal best if the new position scores strictly higher.
//!
//! After all particles have moved, the global best is replaced if some personal
//! best strictly exceeds it, so the best modularity never decreases from one
//! generation to the next.
//!
//! ## Parallelism
//!
//! Particle updates inside a generation only read the global best, which is
//! frozen until the barrier at the end of the generation. With the `parallel`
//! feature they run on rayon. Each particle draws from its own RNG, seeded from
//! the run's master RNG, so seeded runs give the same answer either way.
//!
//! ## References
//!
//! Pizzuti (2008). "GA-Net: A Genetic Algorithm for Community Detection in
//! Social Networks." (locus-based representation)
//! Cai et al. (2015). "Greedy discrete particle swarm optimization for
//! large-scale social network clustering."

use super::decode::{decode_with_min_size, MIN_COMMUNITY_SIZE};
use super::encoding::{initialize_population, Encoding};
use super::modularity::modularity_with_resolution;
use super::operators::{crossover, mutate};
use super::partition::Partition;
use super::traits::CommunityDetection;
use crate::error::{Error, Result};
use crate::graph::Network;
use log::{debug, info, warn};
use petgraph::graph::UnGraph;
use rand::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// PSO-Net community detector.
#[derive(Debug, Clone)]
pub struct PsoNet {
    /// Number of particles in the swarm.
    particles: usize,
    /// Number of generations.
    generations: usize,
    /// Random seed.
    seed: Option<u64>,
    /// Decoder absorption threshold.
    min_community_size: usize,
    /// Resolution parameter (gamma) of the fitness.
    resolution: f64,
    /// Checked at the start of every generation.
    cancel: Option<Arc<AtomicBool>>,
}

impl PsoNet {
    /// Create a detector with 30 particles and 100 generations.
    pub fn new() -> Self {
        Self {
            particles: 30,
            generations: 100,
            seed: None,
            min_community_size: MIN_COMMUNITY_SIZE,
            resolution: 1.0,
            cancel: None,
        }
    }

    /// Set the swarm size.
    pub fn with_particles(mut self, particles: usize) -> Self {
        self.particles = particles;
        self
    }

    /// Set the number of generations.
    pub fn with_generations(mut self, generations: usize) -> Self {
        self.generations = generations;
        self
    }

    /// Set random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the decoder's small-community threshold.
    pub fn with_min_community_size(mut self, size: usize) -> Self {
        self.min_community_size = size;
        self
    }

    /// Set resolution parameter.
    ///
    /// Higher values produce smaller communities.
    pub fn with_resolution(mut self, resolution: f64) -> Self {
        self.resolution = resolution;
        self
    }

    /// Stop early once `flag` is set.
    ///
    /// The flag is polled before each generation; a cancelled run still
    /// returns the best partition found so far.
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Swarm size.
    pub fn particles(&self) -> usize {
        self.particles
    }

    /// Number of generations.
    pub fn generations(&self) -> usize {
        self.generations
    }

    /// Decoder's small-community threshold.
    pub fn min_community_size(&self) -> usize {
        self.min_community_size
    }

    /// Run the optimizer.
    pub fn run(&self, network: &Network) -> Result<Outcome> {
        self.run_with_progress(network, |_| {})
    }

    /// Run the optimizer, calling `on_progress` after every completed generation.
    ///
    /// The callback runs synchronously on the calling thread and cannot
    /// influence the search.
    pub fn run_with_progress<F>(&self, network: &Network, mut on_progress: F) -> Result<Outcome>
    where
        F: FnMut(&Progress<'_>),
    {
        if !(self.resolution.is_finite() && self.resolution >= 0.0) {
            return Err(Error::InvalidParameter {
                name: "resolution",
                message: "must be finite and non-negative",
            });
        }

        let start = Instant::now();
        let mut rng = match self.seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_rng(&mut rand::rng()),
        };

        let mut swarm: Vec<Particle> = initialize_population(network, self.particles, &mut rng)?
            .into_iter()
            .map(|encoding| {
                let fitness = self.fitness(network, &encoding);
                Particle {
                    best: encoding.clone(),
                    current: encoding,
                    best_fitness: fitness,
                }
            })
            .collect();

        // None only when the swarm is empty.
        let mut global: Option<(Encoding, f64)> =
            fittest(&swarm).map(|p| (p.best.clone(), p.best_fitness));

        let mut trace = Vec::with_capacity(self.generations);
        let mut cancelled = false;

        for generation in 0..self.generations {
            if self.is_cancelled() {
                warn!("run cancelled after {generation} of {} generations", self.generations);
                cancelled = true;
                break;
            }

            if let Some((best, _)) = &global {
                let seeds: Vec<u64> = swarm.iter().map(|_| rng.random()).collect();
                self.step(network, &mut swarm, best, &seeds)?;
            }

            // Barrier: the global best only moves between generations.
            if let Some(candidate) = fittest(&swarm) {
                let improved = global
                    .as_ref()
                    .map_or(true, |(_, fitness)| candidate.best_fitness > *fitness);
                if improved {
                    global = Some((candidate.best.clone(), candidate.best_fitness));
                }
            }

            let partition = self.decode_best(&global);
            let q = modularity_with_resolution(network, &partition, self.resolution);
            trace.push(q);
            debug!(
                "generation {}/{}: best Q = {q:.6}, {} communities",
                generation + 1,
                self.generations,
                partition.community_count()
            );

            on_progress(&Progress {
                generation: generation + 1,
                partition: &partition,
                trace: &trace,
                best_modularity: q,
            });
        }

        let partition = self.decode_best(&global);
        let modularity = global.as_ref().map_or(0.0, |(_, fitness)| *fitness);
        let outcome = Outcome {
            generations: trace.len(),
            partition,
            modularity,
            trace,
            elapsed: start.elapsed(),
            cancelled,
        };

        info!(
            "finished in {:.4?}: initial Q = {:.4}, final Q = {:.4}, delta Q = {:.4}",
            outcome.elapsed,
            outcome.initial_modularity(),
            outcome.final_modularity(),
            outcome.delta_modularity()
        );
        Ok(outcome)
    }

    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }

    fn decode(&self, encoding: &Encoding) -> Partition {
        decode_with_min_size(encoding, self.min_community_size)
    }

    fn decode_best(&self, global: &Option<(Encoding, f64)>) -> Partition {
        global
            .as_ref()
            .map(|(encoding, _)| self.decode(encoding))
            .unwrap_or_default()
    }

    fn fitness(&self, network: &Network, encoding: &Encoding) -> f64 {
        modularity_with_resolution(network, &self.decode(encoding), self.resolution)
    }

    /// Cross `a` with `b` and keep the fitter child (the second one on ties).
    fn fitter_child<R: Rng + ?Sized>(
        &self,
        network: &Network,
        a: &Encoding,
        b: &Encoding,
        rng: &mut R,
    ) -> Result<Encoding> {
        let (child1, child2) = crossover(a, b, rng)?;
        if self.fitness(network, &child1) > self.fitness(network, &child2) {
            Ok(child1)
        } else {
            Ok(child2)
        }
    }

    /// Move one particle.
    fn advance<R: Rng + ?Sized>(
        &self,
        network: &Network,
        particle: &mut Particle,
        global_best: &Encoding,
        rng: &mut R,
    ) -> Result<()> {
        let temp = self.fitter_child(network, &particle.current, &particle.best, rng)?;
        let temp = self.fitter_child(network, &temp, global_best, rng)?;
        let temp = mutate(&temp, network, rng);

        let fitness = self.fitness(network, &temp);
        if fitness > particle.best_fitness {
            particle.best = temp.clone();
            particle.best_fitness = fitness;
        }
        particle.current = temp;
        Ok(())
    }

    /// One generation over the whole swarm. `seeds[i]` seeds particle `i`.
    fn step(
        &self,
        network: &Network,
        swarm: &mut [Particle],
        global_best: &Encoding,
        seeds: &[u64],
    ) -> Result<()> {
        #[cfg(feature = "parallel")]
        let moved = swarm
            .par_iter_mut()
            .zip(seeds.par_iter())
            .try_for_each(|(particle, &seed)| {
                let mut rng = StdRng::seed_from_u64(seed);
                self.advance(network, particle, global_best, &mut rng)
            });

        #[cfg(not(feature = "parallel"))]
        let moved = swarm
            .iter_mut()
            .zip(seeds)
            .try_for_each(|(particle, &seed)| {
                let mut rng = StdRng::seed_from_u64(seed);
                self.advance(network, particle, global_best, &mut rng)
            });

        moved
    }
}

impl Default for PsoNet {
    fn default() -> Self {
        Self::new()
    }
}

impl CommunityDetection for PsoNet {
    fn detect<N, E>(&self, graph: &UnGraph<N, E>) -> Result<Vec<usize>> {
        let n = graph.node_count();
        if n == 0 {
            return Err(Error::EmptyInput);
        }

        let network = Network::from(graph);
        let outcome = self.run(&network)?;
        Ok(outcome.partition.to_labels(n))
    }

    fn resolution(&self) -> f64 {
        self.resolution
    }
}

/// Per-particle state.
#[derive(Debug, Clone)]
struct Particle {
    current: Encoding,
    best: Encoding,
    best_fitness: f64,
}

/// First particle with the highest personal-best fitness.
fn fittest(swarm: &[Particle]) -> Option<&Particle> {
    swarm.iter().fold(None, |best: Option<&Particle>, p| match best {
        Some(b) if b.best_fitness >= p.best_fitness => Some(b),
        _ => Some(p),
    })
}

/// Snapshot handed to the progress callback after each generation.
#[derive(Debug, Clone, Copy)]
pub struct Progress<'a> {
    /// Completed generations (1-based).
    pub generation: usize,
    /// Decoded global best.
    pub partition: &'a Partition,
    /// Global-best modularity per completed generation.
    pub trace: &'a [f64],
    /// Modularity of `partition`.
    pub best_modularity: f64,
}

/// Result of a PSO-Net run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Outcome {
    /// Decoded global best.
    pub partition: Partition,
    /// Fitness of the global best.
    pub modularity: f64,
    /// Global-best modularity after each generation.
    pub trace: Vec<f64>,
    /// Generations actually completed.
    pub generations: usize,
    /// Wall-clock time of the run.
    pub elapsed: Duration,
    /// Whether the run stopped on its cancel flag.
    pub cancelled: bool,
}

impl Outcome {
    /// First trace entry, or 0 for an empty trace.
    pub fn initial_modularity(&self) -> f64 {
        self.trace.first().copied().unwrap_or(0.0)
    }

    /// Last trace entry, or 0 for an empty trace.
    pub fn final_modularity(&self) -> f64 {
        self.trace.last().copied().unwrap_or(0.0)
    }

    /// Improvement from the first to the last generation; 0 with fewer than two entries.
    pub fn delta_modularity(&self) -> f64 {
        if self.trace.len() > 1 {
            self.final_modularity() - self.initial_modularity()
        } else {
            0.0
        }
    }
}
