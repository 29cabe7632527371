//! [`EditForm`] of a single `User`.

use std::collections::BTreeMap;

use service::{
    command::{self, Command},
    domain::user,
    infra::database,
    query, Query, Service,
};
use tracerr::Traced;

use crate::{
    detail,
    dialog::{Dialog, Dialogs, Variant},
    user_path, Failure, Navigator, USERS_PATH,
};

/// Validated text field of an [`EditForm`].
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Field {
    /// [`user::Name`].
    Name,

    /// [`user::JobRank`].
    JobRank,

    /// [`user::Position`].
    Position,

    /// [`user::Email`].
    Email,

    /// [`user::IpAddress`].
    IpAddress,

    /// [`user::JoinDate`].
    JoinDate,
}

impl Field {
    /// All the [`Field`]s, in display order.
    pub const ALL: [Self; 6] = [
        Self::Name,
        Self::JobRank,
        Self::Position,
        Self::Email,
        Self::IpAddress,
        Self::JoinDate,
    ];

    /// Validates the provided `value` of this [`Field`], returning the
    /// validation error message, if any.
    #[must_use]
    pub fn validate(self, value: &str) -> Option<&'static str> {
        let (valid, message) = match self {
            Self::Name => (user::Name::new(value).is_some(), "Enter a name."),
            Self::JobRank => {
                (user::JobRank::new(value).is_some(), "Enter a job rank.")
            }
            Self::Position => {
                (user::Position::new(value).is_some(), "Enter a department.")
            }
            Self::Email => (
                user::Email::new(value).is_some(),
                "Not a valid email address.",
            ),
            Self::IpAddress => (
                user::IpAddress::new(value).is_some(),
                "Not a valid IP address.",
            ),
            Self::JoinDate => {
                (user::JoinDate::new(value).is_some(), "Enter a join date.")
            }
        };
        (!valid).then_some(message)
    }
}

/// Edited values of a `User`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FormData {
    /// Edited [`user::Name`].
    pub name: String,

    /// Edited [`user::JobRank`].
    pub job_rank: String,

    /// Edited [`user::Position`].
    pub position: String,

    /// Edited [`user::Email`].
    pub email: String,

    /// Edited [`user::IpAddress`].
    pub ip_address: String,

    /// Edited activity flag.
    pub active: bool,

    /// Edited [`user::JoinDate`].
    pub join_date: String,
}

impl From<&user::Detail> for FormData {
    fn from(detail: &user::Detail) -> Self {
        Self {
            name: detail.user.name.to_string(),
            job_rank: detail.user.job_rank.to_string(),
            position: detail.user.position.to_string(),
            email: detail.user.email.to_string(),
            ip_address: detail.ip_address.to_string(),
            active: detail.user.active,
            join_date: detail.join_date.to_string(),
        }
    }
}

impl FormData {
    /// Returns the value of the provided [`Field`].
    #[must_use]
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::JobRank => &self.job_rank,
            Field::Position => &self.position,
            Field::Email => &self.email,
            Field::IpAddress => &self.ip_address,
            Field::JoinDate => &self.join_date,
        }
    }

    /// Returns a mutable reference to the value of the provided [`Field`].
    fn get_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.name,
            Field::JobRank => &mut self.job_rank,
            Field::Position => &mut self.position,
            Field::Email => &mut self.email,
            Field::IpAddress => &mut self.ip_address,
            Field::JoinDate => &mut self.join_date,
        }
    }

    /// Converts this [`FormData`] into [`user::Changes`] carrying every
    /// valid value.
    #[must_use]
    pub fn changes(&self) -> user::Changes {
        user::Changes {
            name: user::Name::new(self.name.clone()),
            job_rank: user::JobRank::new(self.job_rank.clone()),
            position: user::Position::new(self.position.clone()),
            email: user::Email::new(self.email.clone()),
            ip_address: user::IpAddress::new(self.ip_address.clone()),
            active: Some(self.active),
            join_date: user::JoinDate::new(self.join_date.clone()),
        }
    }
}

/// Edit form of a `User`.
#[derive(Clone, Debug)]
pub struct EditForm {
    /// ID of the edited `User`.
    user_id: user::Id,

    /// Loaded [`user::Detail`].
    original: Option<user::Detail>,

    /// Edited values.
    data: Option<FormData>,

    /// Validation errors of the edited values.
    errors: BTreeMap<Field, &'static str>,

    /// Indicator whether the `User` is being loaded.
    loading: bool,

    /// Indicator whether the `User` doesn't exist.
    not_found: bool,

    /// Indicator whether the changes are being saved.
    saving: bool,

    /// Indicator whether the `User` is being deleted.
    deleting: bool,

    /// Message of the last failed request.
    error: Option<String>,
}

impl EditForm {
    /// Creates a new [`EditForm`] of the `User` with the provided ID, to be
    /// [loaded](EditForm::load) yet.
    #[must_use]
    pub fn new(user_id: user::Id) -> Self {
        Self {
            user_id,
            original: None,
            data: None,
            errors: BTreeMap::new(),
            loading: true,
            not_found: false,
            saving: false,
            deleting: false,
            error: None,
        }
    }

    /// Loads the edited `User`, seeding the [`FormData`] with it.
    pub async fn load<Db>(&mut self, service: &Service<Db>)
    where
        Service<Db>: Query<
            query::user::ById,
            Ok = Option<user::Detail>,
            Err = Traced<database::Error>,
        >,
    {
        self.loading = true;
        match detail::fetch(service, self.user_id.clone()).await {
            Ok(detail) => {
                self.data = Some(FormData::from(&detail));
                self.original = Some(detail);
                self.errors.clear();
            }
            Err(failure) if failure.is_not_found() => self.not_found = true,
            Err(failure) => self.error = Some(failure.message),
        }
        self.loading = false;
    }

    /// Returns the ID of the edited `User`.
    #[must_use]
    pub fn user_id(&self) -> &user::Id {
        &self.user_id
    }

    /// Returns the loaded [`user::Detail`], if any.
    #[must_use]
    pub fn original(&self) -> Option<&user::Detail> {
        self.original.as_ref()
    }

    /// Returns the edited [`FormData`], if loaded.
    #[must_use]
    pub fn data(&self) -> Option<&FormData> {
        self.data.as_ref()
    }

    /// Returns the validation error of the provided [`Field`], if any.
    #[must_use]
    pub fn error_of(&self, field: Field) -> Option<&'static str> {
        self.errors.get(&field).copied()
    }

    /// Returns the message of the last failed request, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Indicates whether the `User` is being loaded.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Indicates whether the edited `User` doesn't exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.not_found
    }

    /// Indicates whether the changes are being saved.
    #[must_use]
    pub fn is_saving(&self) -> bool {
        self.saving
    }

    /// Indicates whether the `User` is being deleted.
    #[must_use]
    pub fn is_deleting(&self) -> bool {
        self.deleting
    }

    /// Sets the `value` of the provided [`Field`], validating it.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let Some(data) = &mut self.data else {
            return;
        };
        let value = value.into();

        match field.validate(&value) {
            Some(message) => _ = self.errors.insert(field, message),
            None => _ = self.errors.remove(&field),
        }
        *data.get_mut(field) = value;
    }

    /// Sets the activity flag.
    pub fn set_active(&mut self, active: bool) {
        if let Some(data) = &mut self.data {
            data.active = active;
        }
    }

    /// Indicates whether the [`FormData`] differs from the loaded `User`.
    ///
    /// Join dates are compared by their date part only.
    #[must_use]
    pub fn has_changes(&self) -> bool {
        let (Some(original), Some(data)) = (&self.original, &self.data) else {
            return false;
        };
        let data_join_date = data.join_date.split('T').next().unwrap_or_default();

        original.user.name.as_ref() != data.name
            || original.user.job_rank.as_ref() != data.job_rank
            || original.user.position.as_ref() != data.position
            || original.user.email.as_ref() != data.email
            || original.ip_address.as_ref() != data.ip_address
            || original.user.active != data.active
            || original.join_date.date() != data_join_date
    }

    /// Indicates whether saving is disabled, because the `User` is still
    /// loading, nothing has changed, or some value is invalid.
    #[must_use]
    pub fn save_disabled(&self) -> bool {
        self.loading || !self.has_changes() || !self.errors.is_empty()
    }

    /// Validates all the [`Field`]s, returning whether they are valid.
    pub fn validate(&mut self) -> bool {
        let Some(data) = &self.data else {
            return false;
        };

        self.errors = Field::ALL
            .into_iter()
            .filter_map(|f| Some((f, f.validate(data.get(f))?)))
            .collect();
        self.errors.is_empty()
    }

    /// Saves the [`FormData`], then alerts the user and navigates to the
    /// detail page of the `User`.
    ///
    /// Nothing is sent if any value is invalid. Returns whether the
    /// [`FormData`] has been saved.
    pub async fn submit<Db>(
        &mut self,
        service: &Service<Db>,
        dialogs: &Dialogs,
        navigator: &mut impl Navigator,
    ) -> bool
    where
        Service<Db>: Command<
            command::UpdateUser,
            Ok = (),
            Err = Traced<command::update_user::ExecutionError>,
        >,
    {
        if !self.validate() {
            return false;
        }
        let Some(changes) = self.data.as_ref().map(FormData::changes) else {
            return false;
        };

        self.saving = true;
        self.error = None;
        let result = service
            .execute(command::UpdateUser {
                user_id: self.user_id.clone(),
                changes,
            })
            .await
            .map_err(Failure::from);
        self.saving = false;

        match result {
            Ok(()) => {
                dialogs
                    .alert(Dialog::Alert {
                        title: "Saved".into(),
                        message: "User information was saved successfully."
                            .into(),
                        confirm_text: "OK".into(),
                        variant: Variant::Success,
                    })
                    .await;
                navigator.push(user_path(self.user_id.as_ref()));
                true
            }
            Err(failure) => {
                self.error = Some(failure.message);
                false
            }
        }
    }

    /// Deletes the `User` once the user confirms it, then alerts the user and
    /// navigates to the users list page.
    ///
    /// Returns whether the `User` has been deleted.
    pub async fn delete<Db>(
        &mut self,
        service: &Service<Db>,
        dialogs: &Dialogs,
        navigator: &mut impl Navigator,
    ) -> bool
    where
        Service<Db>: Command<
            command::DeleteUser,
            Ok = (),
            Err = Traced<command::delete_user::ExecutionError>,
        >,
    {
        let name = self
            .original
            .as_ref()
            .map(|d| d.user.name.to_string())
            .unwrap_or_default();
        let confirmed = dialogs
            .confirm(Dialog::Confirm {
                title: "Delete user".into(),
                message: format!(
                    "Delete user '{name}'? Deleted data cannot be restored.",
                ),
                confirm_text: "Delete".into(),
                cancel_text: "Cancel".into(),
                variant: Variant::Error,
            })
            .await;
        if !confirmed {
            return false;
        }

        self.deleting = true;
        self.error = None;
        let result = service
            .execute(command::DeleteUser {
                user_id: self.user_id.clone(),
            })
            .await
            .map_err(Failure::from);

        match result {
            Ok(()) => {
                dialogs
                    .alert(Dialog::Alert {
                        title: "Deleted".into(),
                        message: "User was deleted successfully.".into(),
                        confirm_text: "OK".into(),
                        variant: Variant::Success,
                    })
                    .await;
                navigator.push(USERS_PATH.to_owned());
                true
            }
            Err(failure) => {
                self.error = Some(failure.message);
                self.deleting = false;
                false
            }
        }
    }
}

#[cfg(test)]
mod spec {
    use serde_json::json;
    use service::{domain::user, infra::Memory, Service};

    use super::{EditForm, Field};
    use crate::{
        detail::DetailView,
        dialog::{Dialog, Dialogs},
        Navigator,
    };

    impl Navigator for Vec<String> {
        fn push(&mut self, path: String) {
            self.push(path);
        }
    }

    fn service() -> Service<Memory> {
        Service::new(Memory::new([serde_json::from_value::<user::Detail>(
            json!({
                "id": "u1",
                "seq_no": "1",
                "name": "Kim",
                "job_rank": "Manager",
                "position": "Sales",
                "email": "kim@example.com",
                "active": true,
                "ip_address": "10.0.0.1",
                "join_date": "2023-04-01T09:00:00Z",
            }),
        )
        .unwrap()]))
    }

    /// Spawns a UI answering every confirmation with the provided `answer`,
    /// and acknowledging every alert.
    fn answering(answer: bool) -> Dialogs {
        let (dialogs, mut shown) = Dialogs::new();
        let ui = dialogs.clone();
        drop(tokio::spawn(async move {
            while let Some((id, dialog)) = shown.recv().await {
                let confirmed = match dialog {
                    Dialog::Confirm { .. } => answer,
                    Dialog::Alert { .. } => true,
                };
                _ = ui.respond(id, confirmed);
            }
        }));
        dialogs
    }

    async fn loaded(service: &Service<Memory>) -> EditForm {
        let mut form = EditForm::new("u1".into());
        form.load(service).await;
        form
    }

    #[tokio::test]
    async fn disables_save_without_changes() {
        let form = loaded(&service()).await;

        assert!(!form.is_loading());
        assert_eq!(form.data().unwrap().name, "Kim");
        assert!(!form.has_changes());
        assert!(form.save_disabled());
    }

    #[tokio::test]
    async fn disables_save_while_loading() {
        let form = EditForm::new("u1".into());

        assert!(form.is_loading());
        assert!(form.save_disabled());
    }

    #[tokio::test]
    async fn compares_join_date_by_date_part() {
        let mut form = loaded(&service()).await;

        form.set(Field::JoinDate, "2023-04-01");
        assert!(!form.has_changes());

        form.set(Field::JoinDate, "2023-04-02");
        assert!(form.has_changes());
        assert!(!form.save_disabled());
    }

    #[tokio::test]
    async fn validates_edited_fields() {
        let mut form = loaded(&service()).await;

        form.set(Field::Email, "kim@example");
        form.set(Field::IpAddress, "10.0.0.256");
        form.set(Field::Name, "  ");
        assert!(form.has_changes());
        assert!(form.save_disabled());
        assert_eq!(
            form.error_of(Field::Email),
            Some("Not a valid email address."),
        );
        assert_eq!(form.error_of(Field::IpAddress), Some("Not a valid IP address."));
        assert_eq!(form.error_of(Field::Name), Some("Enter a name."));

        form.set(Field::Email, "lee@example.com");
        form.set(Field::IpAddress, "10.0.0.2");
        form.set(Field::Name, "Lee");
        assert_eq!(form.error_of(Field::Email), None);
        assert!(!form.save_disabled());
    }

    #[tokio::test]
    async fn reports_missing_user() {
        let mut form = EditForm::new("absent".into());
        form.load(&service()).await;

        assert!(form.is_not_found());
        assert!(form.data().is_none());
        assert!(form.save_disabled());
    }

    #[tokio::test]
    async fn submits_changes_and_navigates() {
        let service = service();
        let mut form = loaded(&service).await;
        let mut navigator = vec![];

        form.set(Field::Name, "Lee");
        form.set_active(false);

        assert!(form.submit(&service, &answering(true), &mut navigator).await);
        assert_eq!(navigator, ["/users/u1"]);
        assert!(!form.is_saving());

        let DetailView::Loaded(detail) =
            DetailView::load(&service, "u1".into()).await
        else {
            panic!("user is not loaded");
        };
        assert_eq!(detail.user.name.as_ref(), "Lee");
        assert!(!detail.user.active);
        assert_eq!(detail.user.email.as_ref(), "kim@example.com");
    }

    #[tokio::test]
    async fn completes_without_ui() {
        let service = service();
        let mut form = loaded(&service).await;
        let mut navigator = vec![];
        let (dialogs, shown) = Dialogs::new();
        drop(shown);

        form.set(Field::Name, "Lee");
        assert!(form.submit(&service, &dialogs, &mut navigator).await);
        assert_eq!(navigator, ["/users/u1"]);

        assert!(!form.delete(&service, &dialogs, &mut navigator).await);
        assert_eq!(navigator, ["/users/u1"]);
    }

    #[tokio::test]
    async fn sends_nothing_when_invalid() {
        let service = service();
        let mut form = loaded(&service).await;
        let mut navigator = vec![];

        form.set(Field::Position, "");

        assert!(!form.submit(&service, &answering(true), &mut navigator).await);
        assert!(navigator.is_empty());
        assert_eq!(form.error_of(Field::Position), Some("Enter a department."));
    }

    #[tokio::test]
    async fn shows_failure_inline() {
        let service = service();
        let mut form = loaded(&service).await;
        let mut navigator = vec![];

        form.set(Field::Name, "Lee");
        assert!(
            form.delete(&service, &answering(true), &mut navigator).await
        );
        navigator.clear();

        assert!(!form.submit(&service, &answering(true), &mut navigator).await);
        assert_eq!(form.error(), Some("User not found"));
        assert!(navigator.is_empty());
    }

    #[tokio::test]
    async fn deletes_only_when_confirmed() {
        let service = service();
        let mut form = loaded(&service).await;
        let mut navigator = vec![];

        assert!(
            !form.delete(&service, &answering(false), &mut navigator).await
        );
        assert!(navigator.is_empty());
        assert!(matches!(
            DetailView::load(&service, "u1".into()).await,
            DetailView::Loaded(_),
        ));

        assert!(form.delete(&service, &answering(true), &mut navigator).await);
        assert_eq!(navigator, ["/users"]);
        assert_eq!(
            DetailView::load(&service, "u1".into()).await,
            DetailView::NotFound,
        );
    }
}
