//! Session addressing for stateless calls
//!
//! A dispatch request names its session in the query string or in a
//! header. Query values are checked before header values.

use std::convert::Infallible;

use rocket::request::{self, FromRequest, Outcome, Request};

use crate::constants::{SESSION_HEADERS, SESSION_QUERY_PARAMS};

/// Session id candidates gathered from one request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionAddress {
    query: Vec<String>,
    headers: Vec<String>,
}

impl SessionAddress {
    /// Address from explicit query and header values
    pub fn new(query: Option<&str>, header: Option<&str>) -> Self {
        Self {
            query: query.map(str::to_string).into_iter().collect(),
            headers: header.map(str::to_string).into_iter().collect(),
        }
    }

    /// Address carried only by the query string
    pub fn from_query(value: &str) -> Self {
        Self::new(Some(value), None)
    }

    /// Address carried only by a header
    pub fn from_header(value: &str) -> Self {
        Self::new(None, Some(value))
    }

    /// Candidates in lookup order, blanks skipped
    pub fn candidates(&self) -> impl Iterator<Item = &str> {
        self.query
            .iter()
            .chain(self.headers.iter())
            .map(String::as_str)
            .filter(|value| !value.trim().is_empty())
    }

    /// Whether the request named no session at all
    pub fn is_empty(&self) -> bool {
        self.candidates().next().is_none()
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for SessionAddress {
    type Error = Infallible;

    async fn from_request(request: &'r Request<'_>) -> request::Outcome<Self, Self::Error> {
        let query = SESSION_QUERY_PARAMS
            .iter()
            .filter_map(|name| request.query_value::<String>(name).and_then(Result::ok))
            .collect();
        let headers = SESSION_HEADERS
            .iter()
            .filter_map(|name| request.headers().get_one(name))
            .map(str::to_string)
            .collect();

        Outcome::Success(Self { query, headers })
    }
}
