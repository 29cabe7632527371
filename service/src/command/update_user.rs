//! [`Command`] for partially updating a [`User`].

use common::operations::Update;
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::User;
use crate::{
    domain::user,
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for partially updating a [`User`].
#[derive(Clone, Debug, From)]
pub struct UpdateUser {
    /// ID of the [`User`] to be updated.
    pub user_id: user::Id,

    /// [`user::Changes`] to merge into the [`User`].
    pub changes: user::Changes,
}

impl<Db> Command<UpdateUser> for Service<Db>
where
    Db: Database<
            Update<(user::Id, user::Changes)>,
            Ok = bool,
            Err = Traced<database::Error>,
        > + Sync,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: UpdateUser) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateUser { user_id, changes } = cmd;

        let existed = self
            .database()
            .execute(Update((user_id.clone(), changes)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        existed
            .then_some(())
            .ok_or(E::UserNotExists(user_id))
            .map_err(tracerr::wrap!())
    }
}

/// Error of [`UpdateUser`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`User`] doesn't exist.
    #[display("`User(id: {_0})` does not exist")]
    #[from(ignore)]
    UserNotExists(#[error(not(source))] user::Id),
}
