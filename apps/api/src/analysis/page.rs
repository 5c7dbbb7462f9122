//! Server-rendered HTML for the single-page analyzer.
//!
//! Templates live in `apps/api/templates` and are compiled into the binary.
//! Their names end in `.html`, so minijinja auto-escapes every value, which
//! covers the resume preview, model output and file names.

use minijinja::{context, Environment, UndefinedBehavior};
use serde::Serialize;

use crate::analysis::analyzer::AnalysisReport;
use crate::errors::AppError;

pub const PAGE_TITLE: &str = "AI Resume Analyzer";
pub const UPLOAD_PROMPT: &str = "Please upload a resume (PDF or TXT) to begin.";
pub const PARSE_ERROR: &str = "Error parsing results: the model did not answer in the expected numbered format.";

const TEMPLATES: [(&str, &str); 4] = [
    ("layout.html", include_str!("../../templates/layout.html")),
    ("index.html", include_str!("../../templates/index.html")),
    ("report.html", include_str!("../../templates/report.html")),
    ("error.html", include_str!("../../templates/error.html")),
];

/// Holds the compiled page templates. Built once at startup and shared
/// through `AppState`.
#[derive(Debug)]
pub struct PageRenderer {
    env: Environment<'static>,
}

impl PageRenderer {
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        for (name, source) in TEMPLATES {
            env.add_template(name, source)?;
        }
        Ok(Self { env })
    }

    fn render<S: Serialize>(&self, template_name: &str, ctx: S) -> Result<String, AppError> {
        self.env
            .get_template(template_name)
            .and_then(|template| template.render(ctx))
            .map_err(|e| {
                AppError::Internal(
                    anyhow::Error::new(e).context(format!("Failed to render {template_name}")),
                )
            })
    }

    /// The page before anything has been uploaded.
    pub fn index(&self) -> Result<String, AppError> {
        self.render(
            "index.html",
            context! { title => PAGE_TITLE, prompt => UPLOAD_PROMPT },
        )
    }

    /// The page showing a failed analysis.
    pub fn error(&self, err: &AppError) -> Result<String, AppError> {
        self.render(
            "error.html",
            context! { title => PAGE_TITLE, message => err.user_message() },
        )
    }

    /// The page showing a finished analysis: preview, then the three sections.
    pub fn report(&self, report: &AnalysisReport) -> Result<String, AppError> {
        self.render(
            "report.html",
            context! { title => PAGE_TITLE, report => report, parse_error => PARSE_ERROR },
        )
    }
}
