//! Thread-safe chain with one lock per site.
//!
//! Coefficient extraction takes every site's read lock, so readers never
//! block each other and always contract a consistent set of matrices. Gate
//! application takes only the target site's write lock: gates on different
//! sites run in parallel, gates on the same site are serialised.

use crate::core::errors::Result;
use crate::core::utils::{self, check_dims};
use crate::core::{MpsChain, PHYSICAL_DIM, Scalar, check_labels, check_position, contract_physical};
use ndarray::Array2;
use parking_lot::RwLock;
use tracing::debug;

type SitePair<T> = (Array2<T>, Array2<T>);

/// An [`MpsChain`] shareable across threads by reference.
#[derive(Debug)]
pub struct SharedMpsChain<T: Scalar = f64> {
    sites: Vec<RwLock<SitePair<T>>>,
    bond_dimension: usize,
}

impl<T: Scalar> From<MpsChain<T>> for SharedMpsChain<T> {
    fn from(chain: MpsChain<T>) -> Self {
        let bond_dimension = chain.bond_dimension();
        let sites = chain.into_pairs().into_iter().map(RwLock::new).collect();
        Self {
            sites,
            bond_dimension,
        }
    }
}

impl<T: Scalar> SharedMpsChain<T> {
    /// Wraps `chain`, giving each site its own lock.
    pub fn new(chain: MpsChain<T>) -> Self {
        Self::from(chain)
    }

    pub fn site_count(&self) -> usize {
        self.sites.len()
    }

    pub fn bond_dimension(&self) -> usize {
        self.bond_dimension
    }

    fn site(&self, position: usize) -> Result<&RwLock<SitePair<T>>> {
        check_position(position, self.sites.len())?;
        Ok(&self.sites[position])
    }

    /// Returns a copy of the two matrices stored at `position`.
    pub fn site_tensors(&self, position: usize) -> Result<SitePair<T>> {
        Ok(self.site(position)?.read().clone())
    }

    /// Replaces both matrices at `position` under that site's write lock.
    pub fn set_site_tensors(&self, position: usize, m0: Array2<T>, m1: Array2<T>) -> Result<()> {
        let site = self.site(position)?;
        check_dims(&m0, self.bond_dimension, self.bond_dimension)?;
        check_dims(&m1, self.bond_dimension, self.bond_dimension)?;

        *site.write() = (m0, m1);
        Ok(())
    }

    /// Returns the amplitude of `labels`, see [`MpsChain::coefficient`].
    pub fn coefficient(&self, labels: &[usize]) -> Result<T> {
        check_labels(labels, self.sites.len())?;

        // Locks are taken in site order; writers only ever hold one.
        let guards: Vec<_> = self.sites.iter().map(|site| site.read()).collect();

        let mut product = Array2::<T>::eye(self.bond_dimension);
        for (pair, &label) in guards.iter().zip(labels) {
            let matrix = if label == 0 { &pair.0 } else { &pair.1 };
            product = product.dot(matrix);
        }
        Ok(utils::trace(&product))
    }

    /// Applies a 2x2 operator at `position`, see [`MpsChain::apply_gate`].
    pub fn apply_gate(&self, gate: &Array2<T>, position: usize) -> Result<()> {
        check_dims(gate, PHYSICAL_DIM, PHYSICAL_DIM)?;
        let site = self.site(position)?;

        let mut pair = site.write();
        let updated = contract_physical(gate, &pair.0, &pair.1, self.bond_dimension)?;
        *pair = updated;

        debug!(position, "applied single-site gate to shared chain");
        Ok(())
    }

    /// Clones the current state into a plain chain.
    ///
    /// Every read lock is held until all sites are copied, so the snapshot
    /// never mixes states from before and after a gate.
    pub fn snapshot(&self) -> MpsChain<T> {
        let guards: Vec<_> = self.sites.iter().map(|site| site.read()).collect();
        let pairs = guards.iter().map(|pair| (**pair).clone()).collect();
        MpsChain::from_pairs_unchecked(pairs, self.bond_dimension)
    }

    pub fn into_inner(self) -> MpsChain<T> {
        let pairs = self.sites.into_iter().map(RwLock::into_inner).collect();
        MpsChain::from_pairs_unchecked(pairs, self.bond_dimension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Gate;
    use crate::core::errors::MpsError;
    use ndarray::arr2;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::thread;

    fn seeded_chain(site_count: usize, bond_dimension: usize) -> MpsChain {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        MpsChain::with_rng(site_count, bond_dimension, &mut rng).unwrap()
    }

    #[test]
    fn test_shared_matches_plain_chain() {
        let chain = seeded_chain(4, 3);
        let shared = SharedMpsChain::from(chain.clone());
        assert_eq!(shared.site_count(), 4);
        assert_eq!(shared.bond_dimension(), 3);

        for labels in [[0, 0, 0, 0], [1, 0, 1, 1], [0, 1, 1, 0]] {
            assert_eq!(
                shared.coefficient(&labels).unwrap(),
                chain.coefficient(&labels).unwrap()
            );
        }
    }

    #[test]
    fn test_parallel_gates_on_distinct_sites() {
        let chain = seeded_chain(6, 3);
        let gate = arr2(&[[0.5, 1.5], [-1.0, 2.0]]);

        let mut sequential = chain.clone();
        for p in 0..6 {
            sequential.apply_gate(&gate, p).unwrap();
        }

        let shared = SharedMpsChain::new(chain);
        thread::scope(|s| {
            for p in 0..6 {
                let shared = &shared;
                let gate = &gate;
                s.spawn(move || shared.apply_gate(gate, p).unwrap());
            }
        });

        let result = shared.into_inner();
        for p in 0..6 {
            assert_eq!(result.site_tensors(p).unwrap(), sequential.site_tensors(p).unwrap());
        }
    }

    #[test]
    fn test_same_site_gates_serialise() {
        // An even number of X gates on one site leaves it unchanged
        let chain = seeded_chain(2, 2);
        let shared = SharedMpsChain::from(chain.clone());
        let x = Gate::<f64>::x();

        thread::scope(|s| {
            for _ in 0..8 {
                let shared = &shared;
                let x = &x;
                s.spawn(move || {
                    for _ in 0..25 {
                        shared.apply_gate(&x.matrix, 1).unwrap();
                    }
                });
            }
        });

        let snapshot = shared.snapshot();
        assert_eq!(snapshot.site_tensors(1).unwrap(), chain.site_tensors(1).unwrap());
    }

    #[test]
    fn test_snapshot_holds_every_site() {
        let chain = seeded_chain(2, 2);
        let shared = SharedMpsChain::from(chain.clone());

        thread::scope(|s| {
            let blocker = shared.sites[1].write();
            let handle = s.spawn(|| shared.snapshot());

            // The snapshot keeps site 0 read-locked while it waits on site 1
            while !shared.sites[0].is_locked() {
                thread::yield_now();
            }
            assert!(shared.sites[0].try_write().is_none());

            drop(blocker);
            let snapshot = handle.join().unwrap();
            for p in 0..2 {
                assert_eq!(snapshot.site_tensors(p).unwrap(), chain.site_tensors(p).unwrap());
            }
        });
    }

    #[test]
    fn test_concurrent_readers() {
        let chain = seeded_chain(3, 2);
        let expected = chain.coefficient(&[1, 0, 1]).unwrap();
        let shared = SharedMpsChain::from(chain);

        thread::scope(|s| {
            for _ in 0..4 {
                let shared = &shared;
                s.spawn(move || {
                    assert_eq!(shared.coefficient(&[1, 0, 1]).unwrap(), expected);
                });
            }
        });
    }

    #[test]
    fn test_shared_errors() {
        let shared = SharedMpsChain::from(seeded_chain(2, 2));
        assert!(matches!(
            shared.coefficient(&[0]),
            Err(MpsError::LengthMismatch { .. })
        ));
        assert!(matches!(
            shared.coefficient(&[0, 3]),
            Err(MpsError::InvalidLabel {
                position: 1,
                label: 3
            })
        ));
        assert!(matches!(
            shared.apply_gate(&Array2::eye(3), 0),
            Err(MpsError::DimensionMismatch { .. })
        ));
        assert!(matches!(
            shared.site_tensors(2),
            Err(MpsError::IndexOutOfBounds { .. })
        ));
        assert!(matches!(
            shared.set_site_tensors(0, Array2::zeros((2, 2)), Array2::zeros((1, 1))),
            Err(MpsError::DimensionMismatch { .. })
        ));

        shared
            .set_site_tensors(0, Array2::eye(2), Array2::zeros((2, 2)))
            .unwrap();
        assert_eq!(shared.site_tensors(0).unwrap().0, Array2::<f64>::eye(2));
    }
}
