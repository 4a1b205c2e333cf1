//! Configurable mock kernel for exercising the failure paths of the
//! classifier, the driver and the scheduler without real geometry.

use clearcut_base::cgmath64::*;
use clearcut_base::obb::Obb;
use clearcut_kernel::{Kernel, KernelError, OpReport, OpResult, ProgressScope, Validity};

/// Tagged stand-in shapes, so volume queries can tell the boolean parts
/// apart.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MockShape {
    /// an input solid
    Input,
    /// the COMMON result
    Common,
    /// the CUT result
    Cut,
    /// the CUT21 result
    Cut21,
    /// a FUSE result
    Fused,
    /// an empty result
    Empty,
}

/// A kernel whose outcomes are configured, not computed.
#[derive(Clone, Debug)]
pub struct MockKernel {
    /// fuzzy values whose pave-fill fails with a kernel error
    pub fail_pave_at: Vec<f64>,
    /// pave-fill reports cancellation regardless of the scope
    pub timeout: bool,
    /// COMMON comes back without solids
    pub common_empty: bool,
    /// SECTION carries vertices
    pub contact: bool,
    /// volume of the COMMON result; may be negative
    pub vol_common: f64,
    /// volume of the CUT result
    pub vol_cut: f64,
    /// volume of the CUT21 result
    pub vol_cut21: f64,
    /// volume of every input solid
    pub vol_input: f64,
}

impl Default for MockKernel {
    fn default() -> Self {
        Self {
            fail_pave_at: Vec::new(),
            timeout: false,
            common_empty: false,
            contact: false,
            vol_common: 1.0,
            vol_cut: 1.0,
            vol_cut21: 1.0,
            vol_input: 10.0,
        }
    }
}

impl MockKernel {
    /// An overlapping pair with the given part volumes.
    pub fn volumes(vol_common: f64, vol_cut: f64, vol_cut21: f64) -> Self {
        Self {
            vol_common,
            vol_cut,
            vol_cut21,
            ..Self::default()
        }
    }

    /// A pair with empty COMMON and a vertex-bearing SECTION.
    pub fn touching() -> Self {
        Self {
            common_empty: true,
            contact: true,
            ..Self::default()
        }
    }

    /// A pair with empty COMMON and an empty SECTION.
    pub fn distinct() -> Self {
        Self {
            common_empty: true,
            ..Self::default()
        }
    }

    /// A kernel whose pave-fill always reports cancellation.
    pub fn timing_out() -> Self {
        Self {
            timeout: true,
            ..Self::default()
        }
    }

    /// Makes pave-fill fail at the given fuzzy value.
    pub fn fail_at(mut self, fuzzy: f64) -> Self {
        self.fail_pave_at.push(fuzzy);
        self
    }
}

impl Kernel for MockKernel {
    type Shape = MockShape;
    type Pave = ();
    type Section = bool;

    fn pave_fill(
        &self,
        _a: &MockShape,
        _b: &MockShape,
        fuzzy: f64,
        scope: &ProgressScope,
    ) -> OpResult<()> {
        if self.timeout {
            return Err(KernelError::Cancelled);
        }
        scope.check()?;
        if self.fail_pave_at.iter().any(|&fail| fail == fuzzy) {
            return Err(KernelError::Failed {
                phase: "pave-fill",
                message: format!("configured failure at fuzzy {fuzzy}"),
            });
        }
        Ok(((), OpReport::default()))
    }

    fn common(&self, _pave: &()) -> OpResult<MockShape> {
        let shape = match self.common_empty {
            true => MockShape::Empty,
            false => MockShape::Common,
        };
        Ok((shape, OpReport::default()))
    }

    fn cut(&self, _pave: &()) -> OpResult<MockShape> { Ok((MockShape::Cut, OpReport::default())) }

    fn cut21(&self, _pave: &()) -> OpResult<MockShape> {
        Ok((MockShape::Cut21, OpReport::default()))
    }

    fn section(&self, _pave: &()) -> OpResult<bool> { Ok((self.contact, OpReport::default())) }

    fn section_has_vertices(&self, section: &bool) -> bool { *section }

    fn fuse(
        &self,
        _a: &MockShape,
        _b: &MockShape,
        _fuzzy: f64,
        _scope: &ProgressScope,
    ) -> OpResult<MockShape> {
        Ok((MockShape::Fused, OpReport::default()))
    }

    fn has_solids(&self, shape: &MockShape) -> bool { *shape != MockShape::Empty }

    fn volume(&self, shape: &MockShape) -> Result<f64, KernelError> {
        Ok(match shape {
            MockShape::Input => self.vol_input,
            MockShape::Common => self.vol_common,
            MockShape::Cut => self.vol_cut,
            MockShape::Cut21 => self.vol_cut21,
            MockShape::Fused => self.vol_cut + self.vol_common,
            MockShape::Empty => 0.0,
        })
    }

    fn min_distance(&self, _a: &MockShape, _b: &MockShape) -> Result<f64, KernelError> { Ok(0.0) }

    fn oriented_bbox(&self, _shape: &MockShape) -> Result<Obb, KernelError> {
        Ok(Obb::new(
            Point3::origin(),
            Matrix3::identity(),
            Vector3::new(0.5, 0.5, 0.5),
        ))
    }

    fn check(&self, _shape: &MockShape) -> Validity { Validity::default() }
}
