//! Pipeline orchestration
//!
//! The orchestrator wires the pieces together:
//! Detector → Parser → Database → Generator → Repairer → Renderer

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, span, trace, warn, Level};

use crate::core::{
    translate, Database, DecisionPredicate, Detector, Diagram, DiagramError, DiagramRenderer,
    Generator, NotationDocument, Parser,
};
use crate::plugins::actor_interaction::{
    ActorInteractionDetector, ActorInteractionDiagram, ActorInteractionGenerator,
    ActorInteractionParser,
};
use crate::plugins::process_flow::{
    FlowGeneratorConfig, ProcessFlowDetector, ProcessFlowDiagram, ProcessFlowGenerator,
    ProcessFlowParser,
};
use crate::plugins::repair::{RepairFix, SyntaxRepairer, SyntaxValidator, ValidationIssue};

/// The notation kinds the pipeline understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagramKind {
    ProcessFlow,
    ActorInteraction,
}

impl DiagramKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagramKind::ProcessFlow => ProcessFlowDiagram::name(),
            DiagramKind::ActorInteraction => ActorInteractionDiagram::name(),
        }
    }

    pub fn all() -> [DiagramKind; 2] {
        [DiagramKind::ProcessFlow, DiagramKind::ActorInteraction]
    }
}

impl fmt::Display for DiagramKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DiagramKind {
    type Err = DiagramError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "process-flow" | "flow" | "bpmn" => Ok(DiagramKind::ProcessFlow),
            "actor-interaction" | "usecase" | "use-case" => Ok(DiagramKind::ActorInteraction),
            _ => Err(DiagramError::UnknownDiagramType {
                diagram_type: s.to_string(),
            }),
        }
    }
}

/// Result of running one notation text through the pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineOutput {
    pub kind: DiagramKind,
    pub diagram_text: String,
    /// Repairs applied to the draft; empty when repair is disabled
    pub fixes: Vec<RepairFix>,
    /// Validation issues left in `diagram_text`
    pub remaining: Vec<ValidationIssue>,
}

impl PipelineOutput {
    pub fn is_valid(&self) -> bool {
        self.remaining.is_empty()
    }
}

/// Both diagrams of a notation document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentOutput {
    pub title: Option<String>,
    pub process_flow: PipelineOutput,
    pub actor_interaction: PipelineOutput,
    pub requirements_md: Option<String>,
}

impl DocumentOutput {
    /// Markdown report with both diagrams in `plantuml` fences
    pub fn to_markdown(&self) -> String {
        format!(
            "# System analysis: {}\n\n## Process diagram\n```plantuml\n{}\n```\n\n## Use case diagram\n```plantuml\n{}\n```\n\n## Requirements\n{}\n",
            self.title.as_deref().unwrap_or("Untitled"),
            self.process_flow.diagram_text,
            self.actor_interaction.diagram_text,
            self.requirements_md.as_deref().unwrap_or_default(),
        )
    }

    /// File name for the report, derived from the title
    pub fn report_file_name(&self) -> String {
        let title = self.title.as_deref().unwrap_or("report").trim();
        let title = if title.is_empty() { "report" } else { title };
        format!("analysis_{}.md", title.replace(char::is_whitespace, "_"))
    }
}

/// Pipeline orchestrator
///
/// Holds one translator per notation kind, the repair pass and an optional
/// renderer. Detectors are consulted in registration order and the highest
/// confidence wins; ties go to the earlier registration.
pub struct Orchestrator {
    detectors: Vec<(DiagramKind, Arc<dyn Detector>)>,
    flow_parser: ProcessFlowParser,
    flow_generator: ProcessFlowGenerator,
    interaction_parser: ActorInteractionParser,
    interaction_generator: ActorInteractionGenerator,
    repairer: SyntaxRepairer,
    validator: SyntaxValidator,
    repair: bool,
    renderer: Option<Box<dyn DiagramRenderer>>,
}

impl Orchestrator {
    /// Create an orchestrator with both notation kinds registered
    pub fn new() -> Self {
        Self {
            detectors: vec![
                (DiagramKind::ProcessFlow, ProcessFlowDiagram::detector()),
                (DiagramKind::ActorInteraction, ActorInteractionDiagram::detector()),
            ],
            flow_parser: ProcessFlowDiagram::create_parser(),
            flow_generator: ProcessFlowDiagram::create_generator(),
            interaction_parser: ActorInteractionDiagram::create_parser(),
            interaction_generator: ActorInteractionDiagram::create_generator(),
            repairer: SyntaxRepairer::new(),
            validator: SyntaxValidator::new(),
            repair: false,
            renderer: None,
        }
    }

    /// Run the repair pass on every translated diagram
    pub fn with_repair(mut self, enabled: bool) -> Self {
        self.repair = enabled;
        self
    }

    pub fn with_flow_config(mut self, config: FlowGeneratorConfig) -> Self {
        self.flow_generator = self.flow_generator.with_config(config);
        self
    }

    pub fn with_predicate<P>(mut self, predicate: P) -> Self
    where
        P: DecisionPredicate + 'static,
    {
        self.flow_generator = self.flow_generator.with_predicate(predicate);
        self
    }

    /// Inject the rendering collaborator
    pub fn with_renderer(mut self, renderer: Box<dyn DiagramRenderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    /// Register an extra detector, consulted after the built-in ones
    pub fn register_detector(&mut self, kind: DiagramKind, detector: Arc<dyn Detector>) {
        self.detectors.push((kind, detector));
    }

    /// Names of the registered detectors, in consultation order
    pub fn detector_names(&self) -> Vec<&'static str> {
        self.detectors
            .iter()
            .map(|(_, detector)| detector.diagram_type())
            .collect()
    }

    pub fn has_renderer(&self) -> bool {
        self.renderer.is_some()
    }

    /// Detect the notation kind of `notation`
    pub fn detect(&self, notation: &str) -> Result<DiagramKind, DiagramError> {
        let detect_span = span!(Level::INFO, "detect_notation", input_len = notation.len());
        let _enter = detect_span.enter();

        let mut best: Option<(DiagramKind, f64)> = None;
        for (kind, detector) in &self.detectors {
            let confidence = detector.confidence(notation);
            trace!(detector = detector.diagram_type(), confidence, "Checking detector");
            if !detector.detect(notation) {
                continue;
            }
            if best.map_or(true, |(_, current)| confidence > current) {
                best = Some((*kind, confidence));
            }
        }

        match best {
            Some((kind, confidence)) => {
                info!(kind = %kind, confidence, "Detected notation kind");
                Ok(kind)
            }
            None => {
                warn!("No suitable detector found for input");
                Err(DiagramError::detection_error(
                    "no suitable detector found for input",
                ))
            }
        }
    }

    /// Translate notation of a known kind; never fails
    pub fn translate(&self, kind: DiagramKind, notation: Option<&str>) -> String {
        match kind {
            DiagramKind::ProcessFlow => translate(
                &self.flow_parser,
                &self.flow_generator,
                ProcessFlowDiagram::create_database(),
                notation,
            ),
            DiagramKind::ActorInteraction => translate(
                &self.interaction_parser,
                &self.interaction_generator,
                ActorInteractionDiagram::create_database(),
                notation,
            ),
        }
    }

    /// Translate notation of a known kind, failing instead of falling back
    /// to the skeleton
    pub fn try_translate(&self, kind: DiagramKind, notation: &str) -> Result<String, DiagramError> {
        match kind {
            DiagramKind::ProcessFlow => strict_translate(
                &self.flow_parser,
                &self.flow_generator,
                ProcessFlowDiagram::create_database(),
                notation,
            ),
            DiagramKind::ActorInteraction => strict_translate(
                &self.interaction_parser,
                &self.interaction_generator,
                ActorInteractionDiagram::create_database(),
                notation,
            ),
        }
    }

    /// Detect, translate and optionally repair
    ///
    /// Text no detector claims is treated as process-flow notation.
    pub fn process(&self, notation: &str) -> PipelineOutput {
        let process_span = span!(Level::INFO, "process_notation", input_len = notation.len());
        let _enter = process_span.enter();

        let kind = self.detect(notation).unwrap_or_else(|error| {
            debug!(%error, "Falling back to process-flow notation");
            DiagramKind::ProcessFlow
        });
        self.process_as(kind, Some(notation))
    }

    /// Translate and optionally repair notation of a known kind
    pub fn process_as(&self, kind: DiagramKind, notation: Option<&str>) -> PipelineOutput {
        let draft = self.translate(kind, notation);
        self.finish(kind, draft)
    }

    /// Run both translators over a document
    pub fn process_document(&self, document: &NotationDocument) -> DocumentOutput {
        let document_span = span!(
            Level::INFO,
            "process_document",
            title = document.title.as_deref().unwrap_or_default()
        );
        let _enter = document_span.enter();

        let output = DocumentOutput {
            title: document.title.clone(),
            process_flow: self.process_as(
                DiagramKind::ProcessFlow,
                document.flow_notation.as_deref(),
            ),
            actor_interaction: self.process_as(
                DiagramKind::ActorInteraction,
                document.interaction_notation.as_deref(),
            ),
            requirements_md: document.requirements_md.clone(),
        };
        info!(
            flow_fixes = output.process_flow.fixes.len(),
            interaction_fixes = output.actor_interaction.fixes.len(),
            "Document processed"
        );
        output
    }

    /// Hand diagram text to the injected renderer
    pub fn render(&self, diagram_text: &str) -> Result<Vec<u8>, DiagramError> {
        let renderer = self
            .renderer
            .as_ref()
            .ok_or_else(|| DiagramError::rendering_unavailable("no renderer configured"))?;
        debug!(renderer = renderer.name(), "Rendering diagram");
        renderer.render(diagram_text)
    }

    fn finish(&self, kind: DiagramKind, draft: String) -> PipelineOutput {
        if !self.repair {
            let remaining = self.validator.validate(&draft);
            return PipelineOutput {
                kind,
                diagram_text: draft,
                fixes: Vec::new(),
                remaining,
            };
        }

        let outcome = self.repairer.repair(&draft);
        debug!(
            kind = %kind,
            fixes = outcome.fixes.len(),
            remaining = outcome.remaining.len(),
            "Repair pass finished"
        );
        PipelineOutput {
            kind,
            diagram_text: outcome.fixed_text,
            fixes: outcome.fixes,
            remaining: outcome.remaining,
        }
    }
}

impl Default for Orchestrator {
    fn default() -> Self {
        Self::new()
    }
}

fn strict_translate<D, P, G>(
    parser: &P,
    generator: &G,
    mut database: D,
    notation: &str,
) -> Result<String, DiagramError>
where
    D: Database,
    P: Parser<D>,
    G: Generator<D>,
{
    let line_count = notation.lines().count();
    if notation.trim().is_empty() {
        return Err(DiagramError::parse_error("notation text is empty", line_count));
    }
    parser
        .parse(notation, &mut database)
        .map_err(|error| DiagramError::parse_error(error.to_string(), line_count))?;
    if database.node_count() == 0 {
        return Err(DiagramError::parse_error(
            format!("no node declarations recognised by {}", parser.name()),
            line_count,
        ));
    }
    generator
        .generate(&database)
        .map_err(|error| DiagramError::generate_error(error.to_string()))
}
