//! Sequential geometric pipelines.
//!
//! A [`Pipeline`] is plain data: an ordered list of [`GeometricOp`] steps and
//! the [`ExecutionStrategy`] used to run them. Each step reads the previous
//! step's output and produces a new image.

use log::debug;
use tessera_image::Image;

use crate::error::{ensure_non_empty, TransformError};
use crate::padding::{resize_pad, ResizeOptions};
use crate::parallel::ExecutionStrategy;
use crate::progress::RowObserver;
use crate::warp::{flip, rotate, FlipMode, RotateParams};

/// A single geometric step.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GeometricOp {
    /// Rotate with the given parameters.
    Rotate(RotateParams),
    /// Mirror along an axis.
    Flip(FlipMode),
    /// Pad, crop or stretch onto a new canvas.
    Resize(ResizeOptions),
}

impl GeometricOp {
    fn validate(&self) -> Result<(), TransformError> {
        match self {
            GeometricOp::Rotate(params) => params.validate(),
            GeometricOp::Flip(_) => Ok(()),
            GeometricOp::Resize(options) => {
                ensure_non_empty(options.size, ["canvas width", "canvas height"])?;
                Ok(())
            }
        }
    }
}

/// An ordered list of geometric steps.
///
/// # Example
///
/// ```
/// use tessera_image::Image;
/// use tessera_imgproc::pipeline::Pipeline;
/// use tessera_imgproc::progress::NoProgress;
/// use tessera_imgproc::warp::{FlipMode, RotateParams};
///
/// let src = Image::<u8, 1>::new([2, 2].into(), vec![1, 2, 3, 4]).unwrap();
/// let pipeline = Pipeline::new()
///     .rotate(RotateParams::new(90.0))
///     .flip(FlipMode::Horizontal);
///
/// let dst = pipeline.apply(&src, [0], &NoProgress).unwrap();
/// assert_eq!(dst.as_slice(), &[1, 3, 2, 4]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pipeline {
    ops: Vec<GeometricOp>,
    strategy: ExecutionStrategy,
}

impl Pipeline {
    /// An empty pipeline running on the global thread pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the execution strategy used by every step.
    pub fn with_strategy(mut self, strategy: ExecutionStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Append a step.
    pub fn push(mut self, op: GeometricOp) -> Self {
        self.ops.push(op);
        self
    }

    /// Append a rotation.
    pub fn rotate(self, params: RotateParams) -> Self {
        self.push(GeometricOp::Rotate(params))
    }

    /// Append a flip.
    pub fn flip(self, mode: FlipMode) -> Self {
        self.push(GeometricOp::Flip(mode))
    }

    /// Append a resize onto a new canvas.
    pub fn resize(self, options: ResizeOptions) -> Self {
        self.push(GeometricOp::Resize(options))
    }

    /// The steps in execution order.
    pub fn ops(&self) -> &[GeometricOp] {
        &self.ops
    }

    /// The execution strategy.
    pub fn strategy(&self) -> ExecutionStrategy {
        self.strategy
    }

    /// Run every step on `src`.
    ///
    /// All steps and the strategy are validated before the first step runs.
    /// `background` fills pixels not reached by a rotation and padded margins;
    /// the observer receives the rows of every step's output in turn. An empty
    /// pipeline returns a copy of `src`.
    ///
    /// # Errors
    ///
    /// Returns the first validation error, or the first error raised by a step.
    pub fn apply<T, const C: usize, O>(
        &self,
        src: &Image<T, C>,
        background: [T; C],
        observer: &O,
    ) -> Result<Image<T, C>, TransformError>
    where
        T: Copy + Default + Send + Sync,
        O: RowObserver + ?Sized,
    {
        self.strategy.validate()?;
        for op in self.ops.iter() {
            op.validate()?;
        }

        debug!(
            "running {} geometric steps on {}",
            self.ops.len(),
            src.size()
        );

        let mut current = src.clone();
        for op in self.ops.iter() {
            current = match op {
                GeometricOp::Rotate(params) => {
                    rotate(&current, params, background, self.strategy, observer)?
                }
                GeometricOp::Flip(mode) => flip(&current, *mode, self.strategy, observer)?,
                GeometricOp::Resize(options) => {
                    resize_pad(&current, options, background, self.strategy, observer)?
                }
            };
        }

        Ok(current)
    }
}
