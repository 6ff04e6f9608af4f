use serde::de::DeserializeOwned;
use url::Url;

use super::{
    ApiError, CTR_PATH, CtrQuery, DashboardBackend, ReportSet, SAMPLE_PATH, SampleSet, TRACE_PATH,
    Trace,
};
use crate::config::ServerSettings;
use crate::http_client::{self, Timeouts};

/// [`DashboardBackend`] speaking JSON over HTTP GET.
#[derive(Clone, Debug)]
pub struct HttpBackend {
    agent: ureq::Agent,
    base_url: Url,
    max_response_bytes: usize,
}

impl HttpBackend {
    /// Build a backend rooted at `base_url`. Endpoint paths are resolved
    /// below it, so a base of `http://host/stats/` reaches `/stats/ctr/`.
    pub fn new(
        base_url: &str,
        timeouts: Timeouts,
        max_response_bytes: usize,
    ) -> Result<Self, ApiError> {
        let mut parsed = Url::parse(base_url.trim()).map_err(|err| ApiError::InvalidUrl {
            url: base_url.to_string(),
            reason: err.to_string(),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl {
                url: base_url.to_string(),
                reason: "URL cannot carry a path".to_string(),
            });
        }
        if !parsed.path().ends_with('/') {
            let path = format!("{}/", parsed.path());
            parsed.set_path(&path);
        }
        Ok(Self {
            agent: http_client::agent(timeouts),
            base_url: parsed,
            max_response_bytes,
        })
    }

    pub fn from_settings(settings: &ServerSettings) -> Result<Self, ApiError> {
        Self::new(
            &settings.base_url,
            settings.timeouts(),
            settings.max_response_bytes,
        )
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str, params: &[(&str, String)]) -> Result<Url, ApiError> {
        let mut url = self
            .base_url
            .join(path.trim_start_matches('/'))
            .map_err(|err| ApiError::InvalidUrl {
                url: self.base_url.to_string(),
                reason: err.to_string(),
            })?;
        if !params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in params {
                pairs.append_pair(name, value);
            }
        }
        Ok(url)
    }

    fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        tracing::debug!(%url, "GET");
        let response = match self
            .agent
            .get(url.as_str())
            .set("Accept", "application/json")
            .call()
        {
            Ok(response) => response,
            Err(ureq::Error::Status(code, response)) => {
                tracing::warn!(%url, code, "Request rejected");
                return Err(ApiError::status(code, response.status_text()));
            }
            Err(ureq::Error::Transport(err)) => {
                tracing::warn!(%url, error = %err, "Request failed");
                return Err(ApiError::Transport(err.to_string()));
            }
        };
        let bytes = http_client::read_response_bytes(response, self.max_response_bytes)
            .map_err(|err| ApiError::Body(err.to_string()))?;
        serde_json::from_slice(&bytes).map_err(|err| ApiError::Decode(err.to_string()))
    }
}

impl DashboardBackend for HttpBackend {
    fn fetch_report(&self, query: &CtrQuery) -> Result<ReportSet, ApiError> {
        let url = self.endpoint(CTR_PATH, &query.params())?;
        self.get_json(url)
    }

    fn fetch_samples(&self) -> Result<SampleSet, ApiError> {
        let url = self.endpoint(SAMPLE_PATH, &[])?;
        self.get_json(url)
    }

    fn fetch_trace(&self, ud: &str) -> Result<Trace, ApiError> {
        let url = self.endpoint(TRACE_PATH, &[("ud", ud.to_string())])?;
        self.get_json(url)
    }
}
