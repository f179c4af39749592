//! Rendering collaborator boundary
//!
//! Turning diagram text into an image belongs to an external tool (a local
//! executable or a remote server). The library only defines the contract and
//! a fallback chain; concrete renderers are constructed by the caller and
//! passed in.

use tracing::{debug, info, span, warn, Level};

use super::DiagramError;

/// A service that turns diagram text into image bytes
///
/// Every failure must be reported as [`DiagramError::RenderingUnavailable`].
pub trait DiagramRenderer: Send + Sync {
    /// Render diagram text into image bytes
    fn render(&self, diagram_text: &str) -> Result<Vec<u8>, DiagramError>;

    /// Name used in logs and error messages
    fn name(&self) -> &str;
}

/// Tries a list of renderers in order and returns the first image produced
///
/// # Example
/// ```
/// use plantsmith::core::{DiagramError, DiagramRenderer, FallbackRenderer};
///
/// struct Offline;
/// impl DiagramRenderer for Offline {
///     fn render(&self, _: &str) -> Result<Vec<u8>, DiagramError> {
///         Err(DiagramError::rendering_unavailable("offline"))
///     }
///     fn name(&self) -> &str { "offline" }
/// }
///
/// let chain = FallbackRenderer::new().with_renderer(Box::new(Offline));
/// let err = chain.render("@startuml\n@enduml").unwrap_err();
/// assert!(err.is_rendering_unavailable());
/// ```
#[derive(Default)]
pub struct FallbackRenderer {
    renderers: Vec<Box<dyn DiagramRenderer>>,
}

impl FallbackRenderer {
    /// Create an empty chain
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a renderer to the chain
    pub fn with_renderer(mut self, renderer: Box<dyn DiagramRenderer>) -> Self {
        self.renderers.push(renderer);
        self
    }

    /// Number of renderers in the chain
    pub fn len(&self) -> usize {
        self.renderers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.renderers.is_empty()
    }
}

impl DiagramRenderer for FallbackRenderer {
    fn render(&self, diagram_text: &str) -> Result<Vec<u8>, DiagramError> {
        let render_span = span!(
            Level::INFO,
            "fallback_render",
            renderer_count = self.renderers.len()
        );
        let _enter = render_span.enter();

        if diagram_text.trim().is_empty() {
            return Err(DiagramError::rendering_unavailable(
                "diagram text must not be empty",
            ));
        }

        let mut failures = Vec::new();
        for renderer in &self.renderers {
            debug!(renderer = renderer.name(), "Trying renderer");
            match renderer.render(diagram_text) {
                Ok(image) => {
                    info!(
                        renderer = renderer.name(),
                        bytes = image.len(),
                        "Rendered diagram"
                    );
                    return Ok(image);
                }
                Err(error) => {
                    warn!(renderer = renderer.name(), %error, "Renderer failed");
                    failures.push(format!("{}: {}", renderer.name(), error));
                }
            }
        }

        if failures.is_empty() {
            return Err(DiagramError::rendering_unavailable(
                "no renderer configured",
            ));
        }
        Err(DiagramError::rendering_unavailable(failures.join("; ")))
    }

    fn name(&self) -> &str {
        "fallback"
    }
}
