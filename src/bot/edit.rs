//! Edit wizard
//!
//! ```text
//! IdSelect ──found──▶ FieldSelect ──known field──▶ ValueInput ──▶ update
//!    │ non-numeric: re-prompt   │ anything else: cancel
//!    └ unknown id: end
//! ```

use tracing::{debug, error};

use super::{Flow, Reply, LOAD_FAILED, SAVE_FAILED};
use crate::core::entry::{Entry, EntryField};
use crate::core::format;
use crate::core::search::Query;
use crate::core::store::EntryStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditStep {
    IdSelect,
    FieldSelect { target: Entry },
    ValueInput { target: Entry, field: EntryField },
}

#[derive(Debug, Clone)]
pub struct EditWizard {
    step: EditStep,
}

impl EditWizard {
    pub fn start() -> (Self, Reply) {
        let wizard = Self {
            step: EditStep::IdSelect,
        };
        (wizard, Reply::text("🔹 Send the ID of the entry to edit:"))
    }

    pub fn step(&self) -> &EditStep {
        &self.step
    }

    pub fn handle(self, text: &str, store: &EntryStore) -> Flow<Self> {
        let value = text.trim();

        match self.step {
            EditStep::IdSelect => {
                // Accept the same ID forms as search ("149", "id:149")
                let Query::Id(id) = Query::parse(value) else {
                    return Flow::Continue(self, Reply::text("⚠️ The ID must be a number. Send the ID again:"));
                };

                match store.find_by_id(id) {
                    Ok(Some(target)) => {
                        debug!(id, "Edit wizard selected entry");
                        let prompt = Reply::with_menu(
                            format!("{}\n\n🔹 Which field do you want to change?", format::render(&target)),
                            EntryField::menu(),
                        );
                        Flow::Continue(
                            Self {
                                step: EditStep::FieldSelect { target },
                            },
                            prompt,
                        )
                    }
                    Ok(None) => Flow::Done(Reply::text(format!("❌ No entry with ID {}.", id))),
                    Err(e) => {
                        error!(error = %e, "Failed to load entry for edit");
                        Flow::Continue(self, Reply::text(LOAD_FAILED))
                    }
                }
            }
            EditStep::FieldSelect { target } => match value.parse::<EntryField>() {
                Ok(field) => {
                    let prompt = format!(
                        "🔹 Current {}: {}\nSend the new value:",
                        field,
                        target.get(field)
                    );
                    Flow::Continue(
                        Self {
                            step: EditStep::ValueInput { target, field },
                        },
                        Reply::text(prompt),
                    )
                }
                Err(_) => Flow::Done(Reply::text("🚫 Edit cancelled.")),
            },
            EditStep::ValueInput { ref target, field } => {
                if field.is_required() && value.is_empty() {
                    let retry = format!("⚠️ {} cannot be empty. Send the new value:", field);
                    return Flow::Continue(self, Reply::text(retry));
                }

                match store.update_field(target.id, field.as_str(), value) {
                    Ok(Some(updated)) => Flow::Done(Reply::text(format!(
                        "✅ Updated #{}: {} = {}",
                        updated.id,
                        field,
                        updated.get(field)
                    ))),
                    Ok(None) => Flow::Done(Reply::text(format!("❌ No entry with ID {}.", target.id))),
                    Err(e) => {
                        error!(error = %e, id = target.id, "Failed to update entry");
                        Flow::Continue(self, Reply::text(SAVE_FAILED))
                    }
                }
            }
        }
    }
}
