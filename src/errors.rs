use std::fmt::{Debug, Display, Formatter};

pub(crate) type EmptyResult = Result<(), Error>;
type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// No usable session, or the site rejected the one we have
    AuthenticationRequired,
    Json,
    Request,
    /// Payload did not have the expected structure
    Parse,
    /// Showcase kept returning pages past the configured cap
    PageLimit,
    Config,
}

pub struct Error {
    kind: ErrorKind,
    source: Option<BoxError>,
}

impl Error {
    pub fn new<E>(kind: ErrorKind, err: Option<E>) -> Self
    where
        E: Into<BoxError>,
    {
        Self {
            kind,
            source: err.map(Into::into),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn is_authentication_required(&self) -> bool {
        self.kind == ErrorKind::AuthenticationRequired
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            ErrorKind::AuthenticationRequired => f.write_str("authentication required"),
            ErrorKind::Json => f.write_str("json serialization error"),
            ErrorKind::Request => f.write_str("network request error"),
            ErrorKind::Parse => f.write_str("unexpected page contents"),
            ErrorKind::PageLimit => f.write_str("showcase page limit exceeded"),
            ErrorKind::Config => f.write_str("invalid plugin configuration"),
        }
    }
}

impl Debug for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut builder = f.debug_struct("galaxy_indiegala::Error");
        builder.field("kind", &self.kind);
        if let Some(source) = &self.source {
            builder.field("source", source);
        }
        builder.finish()
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.as_ref().map(|err| &**err as _)
    }
}

pub(crate) fn authentication_required_error() -> Error {
    Error::new(ErrorKind::AuthenticationRequired, None::<BoxError>)
}

pub(crate) fn json_error<E: Into<BoxError>>(err: E) -> Error {
    Error::new(ErrorKind::Json, Some(err))
}

pub(crate) fn request_error<E: Into<BoxError>>(err: E) -> Error {
    Error::new(ErrorKind::Request, Some(err))
}

pub(crate) fn parse_error<E: Into<BoxError>>(err: E) -> Error {
    Error::new(ErrorKind::Parse, Some(err))
}

pub(crate) fn page_limit_error(limit: u32) -> Error {
    Error::new(
        ErrorKind::PageLimit,
        Some(format!("no end of list marker after {} pages", limit)),
    )
}

pub(crate) fn config_error<E: Into<BoxError>>(err: E) -> Error {
    Error::new(ErrorKind::Config, Some(err))
}
