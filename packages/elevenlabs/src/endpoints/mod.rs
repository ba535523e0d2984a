pub(crate) use crate::error::{Error, Result};
pub(crate) use bytes::Bytes;
pub(crate) use reqwest::{Method, Url};
pub(crate) use serde::{Deserialize, Serialize};
pub(crate) use serde_json::Value;

pub mod genai;

pub type QueryValues = Vec<(&'static str, String)>;

#[derive(Debug)]
pub enum RequestBody {
    Json(Value),
    Empty,
}

pub trait ElevenLabsEndpoint: Send {
    const PATH: &'static str;

    const METHOD: Method;

    type ResponseBody;

    fn query_params(&self) -> Option<QueryValues> {
        None
    }

    fn path_params(&self) -> Vec<(&'static str, &str)> {
        vec![]
    }

    fn request_body(&self) -> Result<RequestBody> {
        Ok(RequestBody::Empty)
    }

    fn response_body(self, body: Bytes) -> Result<Self::ResponseBody>;

    fn url(&self, base: &Url) -> Result<Url> {
        let mut url = base.clone();

        let mut path = Self::PATH.to_string();

        for (placeholder, id) in self.path_params() {
            path = path.replace(placeholder, id);
        }

        url.set_path(&path);

        if let Some(query_params) = self.query_params() {
            url.query_pairs_mut().extend_pairs(query_params);
        }

        if url.cannot_be_a_base() {
            return Err(Error::InvalidUrl(url.to_string()));
        }

        Ok(url)
    }
}
