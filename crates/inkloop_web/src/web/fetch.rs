use inkloop::api::{
    check_status, parse_count, parse_submit, SignupSubmission, SubmitOutcome, WaitlistBackend,
    COUNT_PATH, SUBMIT_PATH,
};
use inkloop::config::WaitlistConfig;
use inkloop::error::ApiError;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

fn js_error(context: &'static str) -> impl Fn(JsValue) -> ApiError {
    move |e| {
        let detail = e.as_string().unwrap_or_else(|| format!("{e:?}"));
        ApiError::Network(format!("{context}: {detail}"))
    }
}

/// [`WaitlistBackend`] over the browser `fetch` API.
#[derive(Debug, Clone)]
pub(super) struct FetchBackend {
    config: WaitlistConfig,
}

impl FetchBackend {
    pub(super) fn new(config: WaitlistConfig) -> Self {
        Self { config }
    }

    /// Send a request and return the body of a 2xx response.
    async fn send(&self, method: &str, path: &str, json: Option<String>) -> Result<String, ApiError> {
        let opts = RequestInit::new();
        opts.set_method(method);
        opts.set_mode(RequestMode::Cors);
        if let Some(body) = &json {
            opts.set_body(&JsValue::from_str(body));
        }

        let url = self.config.endpoint(path);
        let request =
            Request::new_with_str_and_init(&url, &opts).map_err(js_error("fetch: bad request"))?;
        if json.is_some() {
            request
                .headers()
                .set("Content-Type", "application/json")
                .map_err(js_error("fetch: headers"))?;
        }

        let window = web_sys::window().ok_or_else(|| ApiError::Network("no window".to_string()))?;
        let response = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(js_error("fetch: request failed"))?
            .dyn_into::<Response>()
            .map_err(js_error("fetch: expected Response"))?;
        check_status(response.status())?;

        let text = JsFuture::from(response.text().map_err(js_error("fetch: body"))?)
            .await
            .map_err(js_error("fetch: reading body"))?;
        text.as_string()
            .ok_or_else(|| ApiError::Network("fetch: body is not text".to_string()))
    }
}

impl WaitlistBackend for FetchBackend {
    async fn fetch_count(&self) -> Result<u64, ApiError> {
        let body = self.send("GET", COUNT_PATH, None).await?;
        parse_count(&body)
    }

    async fn submit(&self, submission: &SignupSubmission) -> Result<SubmitOutcome, ApiError> {
        let body = self
            .send("POST", SUBMIT_PATH, Some(submission.to_json()?))
            .await?;
        parse_submit(&body)
    }
}
