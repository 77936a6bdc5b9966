//! Startup errors for the tsumi service.

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    IO(#[from] std::io::Error),

    #[error(transparent)]
    Auth(#[from] tsumi_auth::error::Error),

    #[error(transparent)]
    Model(#[from] tsumi_models::error::Error),

    #[error(transparent)]
    Web(#[from] tsumi_web::error::Error),
}
