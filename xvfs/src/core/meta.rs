// SPDX-License-Identifier: MIT

/// Trait implemented by each FS-specific Meta structure.
/// Provides access to the static geometry needed while checking.
pub trait FsMeta<Unit: Ord + Copy> {
    /// First unit of the data region.
    fn first_data_unit(&self) -> Unit;

    /// Last unit of the data region.
    fn last_data_unit(&self) -> Unit;

    /// Total number of units in the image.
    fn total_units(&self) -> usize;

    /// Check if a given unit lies in the data region.
    fn is_valid_unit(&self, unit: Unit) -> bool {
        unit >= self.first_data_unit() && unit <= self.last_data_unit()
    }
}
