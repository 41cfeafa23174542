use serde::Deserialize;

// -- Accounts --

/// Body of both `POST /register` and `POST /login`. Never carries an id;
/// the store assigns one at registration.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

// -- Messages --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewMessage {
    pub posted_by: i64,
    pub text: String,
    /// Epoch seconds. Stamped server-side when omitted.
    #[serde(default)]
    pub posted_at: Option<i64>,
}

/// Body of `PATCH /messages/{id}`. Clients may echo the whole message back,
/// so unknown fields are tolerated; only `text` is read.
#[derive(Debug, Deserialize)]
pub struct UpdateMessageText {
    pub text: String,
}
