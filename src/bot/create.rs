//! Creation wizard
//!
//! ```text
//! KindSelect ─Issue──▶ Version ▶ Name ▶ Module ▶ Description ▶ Solution ▶ save
//!            └Note/Logic──────────────▶ Module ▶ Description ▶ save
//! ```
//!
//! Note and Logic entries never collect Version, Name or Solution; they are
//! saved empty. Cancellation is handled by the dispatcher before a message
//! reaches the wizard.

use tracing::{debug, error};

use super::{Flow, Reply, SAVE_FAILED};
use crate::core::entry::{Entry, Kind};
use crate::core::store::EntryStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateStep {
    KindSelect,
    Version,
    Name,
    Module,
    Description,
    Solution,
}

/// Entry under construction
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub kind: Option<Kind>,
    pub version: String,
    pub name: String,
    pub module: String,
    pub description: String,
    pub solution: String,
}

impl Draft {
    fn is_issue(&self) -> bool {
        self.kind.as_ref().is_some_and(Kind::is_issue)
    }

    fn to_entry(&self) -> Entry {
        let kind = self.kind.clone().unwrap_or(Kind::Note);
        if kind.is_issue() {
            Entry::issue(
                &self.version,
                &self.name,
                &self.module,
                &self.description,
                &self.solution,
            )
        } else {
            Entry::new(kind, &self.module, &self.description)
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateWizard {
    step: CreateStep,
    draft: Draft,
}

fn kind_menu() -> Vec<String> {
    Kind::MENU.iter().map(|k| k.to_string()).collect()
}

impl CreateWizard {
    /// Start a new wizard and return the first prompt
    pub fn start() -> (Self, Reply) {
        let wizard = Self {
            step: CreateStep::KindSelect,
            draft: Draft::default(),
        };
        let prompt = Reply::with_menu("🔹 Choose a kind (Issue / Note / Logic):", kind_menu());
        (wizard, prompt)
    }

    pub fn step(&self) -> CreateStep {
        self.step
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    fn advance(mut self, step: CreateStep, prompt: &str) -> Flow<Self> {
        debug!(from = ?self.step, to = ?step, "Create wizard step");
        self.step = step;
        Flow::Continue(self, Reply::text(prompt))
    }

    /// Feed one message to the current step
    pub fn handle(mut self, text: &str, store: &EntryStore) -> Flow<Self> {
        let value = text.trim().to_string();

        match self.step {
            CreateStep::KindSelect => match Kind::known(&value) {
                Some(Kind::Issue) => {
                    self.draft.kind = Some(Kind::Issue);
                    self.advance(CreateStep::Version, "🔹 Enter the version:")
                }
                Some(kind) => {
                    self.draft.kind = Some(kind);
                    self.draft.version.clear();
                    self.draft.name.clear();
                    self.draft.solution.clear();
                    self.advance(CreateStep::Module, "🔹 Enter the module:")
                }
                None => {
                    let retry = Reply::with_menu(
                        "⚠️ Unknown kind. Please choose Issue, Note or Logic:",
                        kind_menu(),
                    );
                    Flow::Continue(self, retry)
                }
            },
            CreateStep::Version => {
                self.draft.version = value;
                self.advance(CreateStep::Name, "🔹 Enter the issue name:")
            }
            CreateStep::Name => {
                self.draft.name = value;
                self.advance(CreateStep::Module, "🔹 Enter the module:")
            }
            CreateStep::Module => {
                if value.is_empty() {
                    return Flow::Continue(self, Reply::text("⚠️ Module cannot be empty. Enter the module:"));
                }
                self.draft.module = value;
                self.advance(CreateStep::Description, "🔹 Enter the description:")
            }
            CreateStep::Description => {
                self.draft.description = value;
                if self.draft.is_issue() {
                    self.advance(CreateStep::Solution, "🔹 Enter the solution:")
                } else {
                    self.finish(store)
                }
            }
            CreateStep::Solution => {
                self.draft.solution = value;
                self.finish(store)
            }
        }
    }

    fn finish(self, store: &EntryStore) -> Flow<Self> {
        match store.append(self.draft.to_entry()) {
            Ok(saved) => Flow::Done(Reply::text(format!(
                "✅ Saved {} #{} ({})",
                saved.kind, saved.id, saved.module
            ))),
            Err(e) => {
                error!(error = %e, "Failed to save new entry");
                Flow::Continue(self, Reply::text(SAVE_FAILED))
            }
        }
    }
}
