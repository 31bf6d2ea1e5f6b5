use crate::config::{MpsConfig, check_dimensions, check_init_range};
use crate::core::errors::{MpsError, Result};
use crate::core::utils::{self, check_dims, flatten_row_major, unflatten_row_major};
use crate::core::{Gate, Scalar};
use ndarray::{Array1, Array2, Axis, stack};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

/// Number of physical labels per site (one qubit).
pub const PHYSICAL_DIM: usize = 2;

/// Trace-closed matrix product state over a register of qubits.
///
/// Every site owns two D x D matrices, one per physical label. The amplitude
/// of a basis string is the trace of the ordered product of the selected
/// matrices, which closes the bond index into a ring:
///
/// c\[l0, l1, ..., lN-1\] = Tr(T0\[l0\] * T1\[l1\] * ... * TN-1\[lN-1\])
///
/// Matrices are stored in a flat arena indexed by `site * 2 + label`; all 2N
/// entries exist for the lifetime of the chain and always have shape D x D.
#[derive(Clone, Debug)]
pub struct MpsChain<T: Scalar = f64> {
    tensors: Vec<Array2<T>>,
    site_count: usize,
    bond_dimension: usize,
}

impl<T: Scalar> MpsChain<T> {
    /// Creates a chain of `site_count` sites with bond dimension
    /// `bond_dimension`, every entry drawn uniformly from `[0, 1)`.
    ///
    /// The state is raw: no normalisation or orthogonality is imposed.
    pub fn new(site_count: usize, bond_dimension: usize) -> Result<Self> {
        let mut rng = StdRng::from_os_rng();
        Self::with_rng(site_count, bond_dimension, &mut rng)
    }

    /// Same as [`MpsChain::new`] but draws entries from the given generator.
    pub fn with_rng<R: Rng>(
        site_count: usize,
        bond_dimension: usize,
        rng: &mut R,
    ) -> Result<Self> {
        Self::random(site_count, bond_dimension, 0.0, 1.0, rng)
    }

    /// Creates a chain from a [`MpsConfig`], seeding the generator when the
    /// configuration carries a seed.
    pub fn from_config(config: &MpsConfig) -> Result<Self> {
        config.validate()?;
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::random(
            config.site_count,
            config.bond_dimension,
            config.init_low,
            config.init_high,
            &mut rng,
        )
    }

    fn random<R: Rng>(
        site_count: usize,
        bond_dimension: usize,
        low: f64,
        high: f64,
        rng: &mut R,
    ) -> Result<Self> {
        check_dimensions(site_count, bond_dimension)?;
        check_init_range(low, high)?;

        let shape = (bond_dimension, bond_dimension);
        let mut tensors = Vec::with_capacity(site_count * PHYSICAL_DIM);
        for _ in 0..site_count * PHYSICAL_DIM {
            tensors.push(Array2::from_shape_simple_fn(shape, || {
                T::sample(&mut *rng, low, high)
            }));
        }

        debug!(site_count, bond_dimension, "created random chain");

        Ok(Self {
            tensors,
            site_count,
            bond_dimension,
        })
    }

    /// Creates a chain from explicit `(m0, m1)` pairs, one per site.
    ///
    /// All matrices must be square and share the same dimension.
    pub fn from_site_tensors(pairs: Vec<(Array2<T>, Array2<T>)>) -> Result<Self> {
        let Some((first, _)) = pairs.first() else {
            return Err(MpsError::EmptyChain);
        };

        let (rows, cols) = first.dim();
        check_dimensions(pairs.len(), rows)?;
        if rows != cols {
            return Err(MpsError::DimensionMismatch {
                expected_rows: rows,
                expected_cols: rows,
                got_rows: rows,
                got_cols: cols,
            });
        }

        for (m0, m1) in &pairs {
            check_dims(m0, rows, rows)?;
            check_dims(m1, rows, rows)?;
        }

        Ok(Self::from_pairs_unchecked(pairs, rows))
    }

    /// Rebuilds a chain from pairs whose shapes are already known to be valid.
    pub(crate) fn from_pairs_unchecked(
        pairs: Vec<(Array2<T>, Array2<T>)>,
        bond_dimension: usize,
    ) -> Self {
        let site_count = pairs.len();
        let tensors = pairs.into_iter().flat_map(|(m0, m1)| [m0, m1]).collect();
        Self {
            tensors,
            site_count,
            bond_dimension,
        }
    }

    /// Consumes the chain, returning its `(m0, m1)` pairs in site order.
    pub(crate) fn into_pairs(self) -> Vec<(Array2<T>, Array2<T>)> {
        let mut pairs = Vec::with_capacity(self.site_count);
        let mut tensors = self.tensors.into_iter();
        while let (Some(m0), Some(m1)) = (tensors.next(), tensors.next()) {
            pairs.push((m0, m1));
        }
        pairs
    }

    /// Number of sites N.
    pub fn site_count(&self) -> usize {
        self.site_count
    }

    /// Bond dimension D.
    pub fn bond_dimension(&self) -> usize {
        self.bond_dimension
    }

    /// Arena slot of label 0 at `position`.
    fn slot(&self, position: usize) -> Result<usize> {
        check_position(position, self.site_count)?;
        Ok(position * PHYSICAL_DIM)
    }

    /// Returns the two matrices stored at `position`.
    pub fn site_tensors(&self, position: usize) -> Result<(&Array2<T>, &Array2<T>)> {
        let slot = self.slot(position)?;
        Ok((&self.tensors[slot], &self.tensors[slot + 1]))
    }

    /// Replaces both matrices at `position`.
    ///
    /// Nothing is written unless both matrices are D x D.
    pub fn set_site_tensors(
        &mut self,
        position: usize,
        m0: Array2<T>,
        m1: Array2<T>,
    ) -> Result<()> {
        let slot = self.slot(position)?;
        check_dims(&m0, self.bond_dimension, self.bond_dimension)?;
        check_dims(&m1, self.bond_dimension, self.bond_dimension)?;

        self.tensors[slot] = m0;
        self.tensors[slot + 1] = m1;
        Ok(())
    }

    /// Returns the amplitude of the basis string `labels`.
    ///
    /// Contracts the chain left to right starting from the identity and takes
    /// the trace of the final product. `labels` must contain exactly one 0/1
    /// entry per site.
    pub fn coefficient(&self, labels: &[usize]) -> Result<T> {
        check_labels(labels, self.site_count)?;

        let product = labels.iter().enumerate().fold(
            Array2::<T>::eye(self.bond_dimension),
            |acc, (position, &label)| acc.dot(&self.tensors[position * PHYSICAL_DIM + label]),
        );
        let value = utils::trace(&product);

        trace!(?labels, %value, "contracted chain");
        Ok(value)
    }

    /// Returns the amplitude of the basis state with integer index `index`.
    ///
    /// Site 0 is the most significant bit, so indices follow the row-major
    /// order of [`MpsChain::to_state_vector`].
    pub fn coefficient_of_index(&self, index: usize) -> Result<T> {
        let labels = labels_of_index(index, self.site_count)?;
        self.coefficient(&labels)
    }

    /// Contracts every basis string, returning all 2^N amplitudes in
    /// row-major order (last site fastest).
    ///
    /// Warning: the result grows exponentially with the number of sites.
    pub fn to_state_vector(&self) -> Result<Array1<T>> {
        let size = basis_size(self.site_count).ok_or(MpsError::TooManySites {
            num_sites: self.site_count,
        })?;

        let amplitudes = (0..size)
            .map(|index| self.coefficient_of_index(index))
            .collect::<Result<Vec<T>>>()?;

        debug!(size, "expanded chain into state vector");
        Ok(Array1::from_vec(amplitudes))
    }

    /// Applies a 2x2 operator to the physical label of `position`.
    ///
    /// The site's two matrices are flattened row-major, stacked into a
    /// 2 x D^2 matrix, multiplied on the left by `gate` and unflattened with
    /// the same ordering. Other sites are untouched. The gate is not checked
    /// for unitarity.
    pub fn apply_gate(&mut self, gate: &Array2<T>, position: usize) -> Result<()> {
        check_dims(gate, PHYSICAL_DIM, PHYSICAL_DIM)?;
        let slot = self.slot(position)?;

        let (m0, m1) = contract_physical(
            gate,
            &self.tensors[slot],
            &self.tensors[slot + 1],
            self.bond_dimension,
        )?;

        self.tensors[slot] = m0;
        self.tensors[slot + 1] = m1;

        debug!(position, "applied single-site gate");
        Ok(())
    }

    /// Applies a validated [`Gate`] at `position`.
    pub fn apply(&mut self, gate: &Gate<T>, position: usize) -> Result<()> {
        self.apply_gate(&gate.matrix, position)
    }
}

/// Computes the updated `(m0, m1)` pair of a site under `gate`.
///
/// `gate` must already be 2x2 and both matrices `dim x dim`.
pub(crate) fn contract_physical<T: Scalar>(
    gate: &Array2<T>,
    m0: &Array2<T>,
    m1: &Array2<T>,
    dim: usize,
) -> Result<(Array2<T>, Array2<T>)> {
    let flat0 = flatten_row_major(m0);
    let flat1 = flatten_row_major(m1);
    let stacked = stack(Axis(0), &[flat0.view(), flat1.view()])?;

    let updated = gate.dot(&stacked);

    let new_m0 = unflatten_row_major(updated.row(0), dim)?;
    let new_m1 = unflatten_row_major(updated.row(1), dim)?;
    Ok((new_m0, new_m1))
}

pub(crate) fn check_position(position: usize, site_count: usize) -> Result<()> {
    if position >= site_count {
        return Err(MpsError::IndexOutOfBounds {
            index: position,
            num_sites: site_count,
        });
    }
    Ok(())
}

/// Validates a label string before any contraction starts.
pub(crate) fn check_labels(labels: &[usize], site_count: usize) -> Result<()> {
    if labels.len() != site_count {
        return Err(MpsError::LengthMismatch {
            expected: site_count,
            got: labels.len(),
        });
    }

    if let Some((position, &label)) = labels
        .iter()
        .enumerate()
        .find(|&(_, &label)| label >= PHYSICAL_DIM)
    {
        return Err(MpsError::InvalidLabel { position, label });
    }

    Ok(())
}

/// 2^N, or `None` when it does not fit in a `usize`.
fn basis_size(site_count: usize) -> Option<usize> {
    u32::try_from(site_count)
        .ok()
        .and_then(|shift| 1usize.checked_shl(shift))
}

/// Splits a basis index into per-site labels, site 0 first.
fn labels_of_index(index: usize, site_count: usize) -> Result<Vec<usize>> {
    if basis_size(site_count).is_some_and(|size| index >= size) {
        return Err(MpsError::BasisIndexOutOfRange {
            index,
            num_sites: site_count,
        });
    }

    let labels = (0..site_count)
        .map(|position| {
            let shift = site_count - 1 - position;
            if shift >= usize::BITS as usize {
                0
            } else {
                (index >> shift) & 1
            }
        })
        .collect();
    Ok(labels)
}
