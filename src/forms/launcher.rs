//! Form launcher and modal host
//!
//! Pages offer a fixed set of forms depending on what page they are; opening
//! one of them goes through a [`ModalHost`], which keeps exactly one form
//! instance interactive at a time.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::capabilities::{CurrentUser, Notifier};
use super::schema::{FormKind, FormSchema, SuccessBehavior};
use super::sections::SectionController;
use super::submission::{FormSubmitter, SubmissionController, SubmissionStatus};
use super::value::{FieldValue, FormRequest};
use crate::domain::Tour;

/// Identity of a page that hosts form entry points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PageIdentity {
    Home,
    Tours,
    TourDetail,
    Cultural,
    Adventure,
    Festivals,
    Hotels,
    Planning,
    About,
    Contact,
}

/// Forms offered on each page
pub fn launchers_for(page: PageIdentity) -> &'static [FormKind] {
    use FormKind::*;
    match page {
        PageIdentity::Home => &[CustomTour, Quote, Contact],
        PageIdentity::Tours
        | PageIdentity::TourDetail
        | PageIdentity::Cultural
        | PageIdentity::Adventure => &[Booking, CustomTour, Quote],
        PageIdentity::Festivals => &[Booking, Quote],
        PageIdentity::Hotels => &[Quote, Contact],
        PageIdentity::Planning => &[CustomTour, Quote],
        PageIdentity::About => &[Contact],
        PageIdentity::Contact => &[Contact, Quote],
    }
}

/// Entry point shown on a page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LauncherEntry {
    pub kind: FormKind,
    pub label: &'static str,
    pub title: &'static str,
}

pub fn launcher_entries(page: PageIdentity) -> Vec<LauncherEntry> {
    launchers_for(page)
        .iter()
        .map(|kind| {
            let schema = kind.schema();
            LauncherEntry {
                kind: *kind,
                label: schema.launcher_label,
                title: schema.title,
            }
        })
        .collect()
}

/// Data a form is opened with
#[derive(Debug, Clone, Default)]
pub struct LaunchContext {
    pub prefill: FormRequest,
}

impl LaunchContext {
    pub fn none() -> Self {
        Self::default()
    }

    /// Context for a form opened from a tour card or detail page.
    pub fn for_tour(tour: &Tour) -> Self {
        Self {
            prefill: FormRequest::new()
                .with("tourId", tour.id.to_string())
                .with("tourName", tour.name.clone())
                .with("tourType", tour.category.to_string()),
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.prefill.update_field(name, value);
        self
    }
}

/// What the modal currently renders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormView {
    Editing,
    Submitting,
    Confirmation,
}

/// The one form instance a host has open
pub struct ActiveForm {
    pub controller: SubmissionController,
    pub sections: SectionController,
}

impl ActiveForm {
    pub fn kind(&self) -> FormKind {
        self.controller.kind()
    }

    pub fn schema(&self) -> &'static FormSchema {
        self.controller.schema()
    }

    pub fn view(&self) -> FormView {
        match self.controller.status() {
            SubmissionStatus::Submitting => FormView::Submitting,
            SubmissionStatus::Success
                if self.schema().on_success == SuccessBehavior::ShowConfirmation =>
            {
                FormView::Confirmation
            }
            _ => FormView::Editing,
        }
    }

    /// Share of sections whose fields currently validate
    pub fn progress(&self) -> u8 {
        let schema = self.schema();
        let record = self.controller.record();
        self.sections
            .completion_percent(|id| schema.section_complete(id, &record))
    }
}

/// Hosts at most one open form
pub struct ModalHost {
    submitter: Arc<dyn FormSubmitter>,
    notifier: Arc<dyn Notifier>,
    current_user: Arc<dyn CurrentUser>,
    active: Option<ActiveForm>,
}

impl ModalHost {
    pub fn new(
        submitter: Arc<dyn FormSubmitter>,
        notifier: Arc<dyn Notifier>,
        current_user: Arc<dyn CurrentUser>,
    ) -> Self {
        Self {
            submitter,
            notifier,
            current_user,
            active: None,
        }
    }

    /// Open `kind`, replacing whatever form was open.
    ///
    /// The record starts from the schema defaults, then the signed-in user's
    /// name and email, then the launch context.
    pub fn open(&mut self, kind: FormKind, context: LaunchContext) -> &mut ActiveForm {
        if let Some(previous) = self.active.take() {
            tracing::debug!(previous = %previous.kind(), next = %kind, "Replacing open form");
            previous.controller.abandon();
        }

        let schema = kind.schema();
        let mut record = schema.defaults();
        if let Some(user) = self.current_user.profile() {
            let identity = FormRequest::new()
                .with("name", user.name)
                .with("email", user.email);
            schema.apply_prefill(&mut record, &identity);
        }
        schema.apply_prefill(&mut record, &context.prefill);

        tracing::info!(form = %kind, "Opening form");
        self.active.insert(ActiveForm {
            controller: SubmissionController::with_record(
                kind,
                record,
                self.submitter.clone(),
                self.notifier.clone(),
            ),
            sections: SectionController::for_schema(schema),
        })
    }

    /// Close the open form, discarding unsent input. Returns whether a form
    /// was open.
    pub fn close(&mut self) -> bool {
        match self.active.take() {
            Some(form) => {
                tracing::debug!(form = %form.kind(), "Closing form");
                form.controller.abandon();
                true
            }
            None => false,
        }
    }

    pub fn is_open(&self) -> bool {
        self.active.is_some()
    }

    pub fn active(&self) -> Option<&ActiveForm> {
        self.active.as_ref()
    }

    pub fn active_mut(&mut self) -> Option<&mut ActiveForm> {
        self.active.as_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TourCategory;
    use crate::forms::capabilities::{Anonymous, UserProfile};
    use crate::forms::submission::tests::{FakeSubmitter, RecordingNotifier};
    use crate::forms::SubmitOutcome;
    use tokio::sync::Notify;
    use uuid::Uuid;

    fn host_with(submitter: Arc<FakeSubmitter>, user: Arc<dyn CurrentUser>) -> ModalHost {
        ModalHost::new(submitter, Arc::new(RecordingNotifier::default()), user)
    }

    #[test]
    fn page_table_is_fixed() {
        assert_eq!(
            launchers_for(PageIdentity::Tours),
            &[FormKind::Booking, FormKind::CustomTour, FormKind::Quote]
        );
        assert_eq!(
            launchers_for(PageIdentity::Contact),
            &[FormKind::Contact, FormKind::Quote]
        );

        let entries = launcher_entries(PageIdentity::Contact);
        assert_eq!(entries[0].label, "Contact Us");
        assert_eq!(entries[1].label, "Get a Quote");
    }

    #[test]
    fn opening_replaces_previous_form() {
        let mut host = host_with(FakeSubmitter::ok(), Arc::new(Anonymous));

        let first = host.open(FormKind::Quote, LaunchContext::none()).controller.clone();
        first.update_field("name", "Draft that will be dropped");
        host.open(FormKind::Contact, LaunchContext::none());

        assert!(first.is_abandoned());
        assert_eq!(host.active().map(ActiveForm::kind), Some(FormKind::Contact));
        assert!(host.active().unwrap().controller.record().text("name").is_none());
    }

    #[test]
    fn close_discards_state() {
        let mut host = host_with(FakeSubmitter::ok(), Arc::new(Anonymous));
        let form = host.open(FormKind::Contact, LaunchContext::none()).controller.clone();
        form.update_field("message", "Hello");

        assert!(host.close());
        assert!(!host.is_open());
        assert!(form.is_abandoned());
        assert!(!host.close());

        host.open(FormKind::Contact, LaunchContext::none());
        assert!(host.active().unwrap().controller.record().text("message").is_none());
    }

    #[test]
    fn tour_context_and_user_seed_the_record() {
        let user = UserProfile {
            name: "Sonam Choden".to_string(),
            email: "sonam@example.bt".to_string(),
        };
        let mut host = host_with(FakeSubmitter::ok(), Arc::new(user));
        let mut tour = Tour::new(Uuid::from_u128(7), "Bumthang Cultural Trek", TourCategory::Cultural);
        tour.duration = Some(8);

        let form = host.open(FormKind::Booking, LaunchContext::for_tour(&tour));
        let record = form.controller.record();

        assert_eq!(record.text("tourName"), Some("Bumthang Cultural Trek"));
        assert_eq!(record.text("tourId"), Some(tour.id.to_string().as_str()));
        assert_eq!(record.text("name"), Some("Sonam Choden"));
        assert_eq!(record.text("email"), Some("sonam@example.bt"));
        // Booking has no tour type field.
        assert!(record.get("tourType").is_none());
    }

    #[test]
    fn explicit_context_wins_over_user_profile() {
        let user = UserProfile {
            name: "Account Holder".to_string(),
            email: "holder@example.com".to_string(),
        };
        let mut host = host_with(FakeSubmitter::ok(), Arc::new(user));
        let context = LaunchContext::none().with_field("name", "Travelling Friend");

        let form = host.open(FormKind::Quote, context);
        assert_eq!(form.controller.record().text("name"), Some("Travelling Friend"));
        assert_eq!(form.controller.record().text("email"), Some("holder@example.com"));
    }

    #[test]
    fn sections_and_progress_follow_schema() {
        let mut host = host_with(FakeSubmitter::ok(), Arc::new(Anonymous));
        let form = host.open(FormKind::Quote, LaunchContext::none());

        assert!(form.sections.is_expanded("personal"));
        assert!(!form.sections.is_expanded("preferences"));
        // Only the optional preferences section validates so far.
        assert_eq!(form.progress(), 33);

        form.controller.update_field("name", "Pema");
        form.controller.update_field("email", "pema@example.com");
        form.controller.update_field("tourType", "Cultural");
        assert_eq!(form.progress(), 100);
    }

    #[tokio::test]
    async fn booking_shows_confirmation_after_success() {
        let mut host = host_with(FakeSubmitter::ok(), Arc::new(Anonymous));
        let form = host.open(FormKind::Booking, LaunchContext::none());
        form.controller.update_field("name", "Tashi");
        form.controller.update_field("email", "tashi@example.bt");
        form.controller.update_field("travelDate", "2027-04-02");
        assert_eq!(form.view(), FormView::Editing);

        let controller = form.controller.clone();
        assert_eq!(controller.submit().await, SubmitOutcome::Submitted);
        assert_eq!(host.active().unwrap().view(), FormView::Confirmation);
    }

    #[tokio::test]
    async fn quote_stays_editable_after_success() {
        let mut host = host_with(FakeSubmitter::ok(), Arc::new(Anonymous));
        let form = host.open(FormKind::Quote, LaunchContext::none());
        form.controller.update_field("name", "Pema");
        form.controller.update_field("email", "pema@example.com");
        form.controller.update_field("tourType", "Festival");

        let controller = form.controller.clone();
        assert_eq!(controller.submit().await, SubmitOutcome::Submitted);
        assert_eq!(host.active().unwrap().view(), FormView::Editing);
        assert!(controller.record().text("name").is_none());
    }

    #[tokio::test]
    async fn closing_mid_flight_drops_the_late_result() {
        let gate = Arc::new(Notify::new());
        let submitter = FakeSubmitter::gated(gate.clone());
        let mut host = host_with(submitter.clone(), Arc::new(Anonymous));
        let form = host.open(FormKind::Contact, LaunchContext::none()).controller.clone();
        form.update_field("name", "Kinley");
        form.update_field("email", "kinley@example.com");
        form.update_field("message", "Is March a good time to visit?");

        let (outcome, _) = tokio::join!(form.submit(), async {
            tokio::task::yield_now().await;
            host.close();
            gate.notify_one();
        });

        assert_eq!(outcome, SubmitOutcome::Abandoned);
        assert_eq!(submitter.calls(), 1);
        assert!(!host.is_open());
    }
}
