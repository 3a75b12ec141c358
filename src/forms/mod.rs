//! Lead-capture form framework
//!
//! Concrete forms (booking, custom tour, quote, contact) are schema
//! declarations in [`schema`]; [`SectionController`], [`SubmissionController`]
//! and [`ModalHost`] are shared by all of them.

pub mod capabilities;
pub mod error;
pub mod launcher;
pub mod schema;
pub mod sections;
pub mod submission;
pub mod value;

pub use capabilities::{Anonymous, CurrentUser, Notice, NoticeKind, Notifier, TracingNotifier, UserProfile};
pub use error::{FormFailure, SubmissionError, ValidationErrors};
pub use launcher::{
    launcher_entries, launchers_for, ActiveForm, FormView, LaunchContext, LauncherEntry, ModalHost,
    PageIdentity,
};
pub use schema::{FieldKind, FieldSpec, FormKind, FormSchema, SectionSpec, SuccessBehavior};
pub use sections::SectionController;
pub use submission::{FormSubmitter, SubmissionController, SubmissionStatus, SubmitOutcome};
pub use value::{FieldValue, FormRequest};
