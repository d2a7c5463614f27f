//! The rendering seam between the report pipeline and a chart backend.

use crate::error::EngineError;
use crate::spec::ChartSpec;
use std::future::Future;

/// A backend that turns one chart spec into PNG bytes.
///
/// The returned future is the completion signal: it resolves exactly when
/// the raster is finished, never earlier. Implementations should move CPU
/// heavy work off the async executor.
pub trait ChartEngine: Send + Sync + 'static {
    /// Short name used in logs and availability errors.
    fn name(&self) -> &str;

    /// Whether the backend is ready to accept work.
    fn is_available(&self) -> bool {
        true
    }

    /// Render `spec` at its declared pixel size.
    fn render_chart(
        &self,
        spec: ChartSpec,
    ) -> impl Future<Output = Result<Vec<u8>, EngineError>> + Send;
}
