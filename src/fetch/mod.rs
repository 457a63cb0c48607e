mod error;

use std::future::Future;

use futures::future::BoxFuture;
use reqwest::{header::CONTENT_TYPE, Client};
use tracing::{instrument, Level};
use url::{form_urlencoded, Url};

use crate::identity::Identity;
use crate::parse;
use crate::section::Section;

pub use error::{Error, Result};

/// Connect page of the notes application, relative to the backend origin.
pub static CONNECT_PATH: &str = "/WD210AWP/WD210Awp.exe/CONNECT/IUT_Note_Etudiant";
pub static DEFAULT_BASE: &str = "https://dsidev3.univ-lyon1.fr";
pub static DEFAULT_ACADEMIC_YEAR: &str = "2018";
/// Asks the session for its prepared notes table.
static TABLE_REQUEST: &str = "WD_ACTION_=AJAXEXECUTE&LIGNESTABLE=A7&0=142";
static FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// The two kinds of request the notes backend needs.
pub trait Transport: Sync {
    fn fetch_page<'a>(&'a self, url: &'a Url) -> BoxFuture<'a, Result<String>>;
    /// Raw response body; the notes table names its own charset.
    fn submit_form<'a>(&'a self, url: &'a Url, body: String) -> BoxFuture<'a, Result<Vec<u8>>>;
}

impl Transport for Client {
    fn fetch_page<'a>(&'a self, url: &'a Url) -> BoxFuture<'a, Result<String>> {
        Box::pin(async move {
            let response = self.get(url.clone()).send().await?.error_for_status()?;
            Ok(response.text().await?)
        })
    }

    fn submit_form<'a>(&'a self, url: &'a Url, body: String) -> BoxFuture<'a, Result<Vec<u8>>> {
        Box::pin(async move {
            let response = self
                .post(url.clone())
                .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
                .body(body)
                .send()
                .await?
                .error_for_status()?;
            Ok(response.bytes().await?.to_vec())
        })
    }
}

pub fn make_client() -> Client {
    Client::builder()
        .gzip(true)
        .cookie_store(true)
        .build()
        .expect("client creation should succeed")
}

/// Where the notes backend lives and which year to ask it about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Backend {
    pub base: Url,
    pub academic_year: String,
}

impl Default for Backend {
    fn default() -> Self {
        Self {
            base: Url::parse(DEFAULT_BASE).expect("default base url should be valid"),
            academic_year: DEFAULT_ACADEMIC_YEAR.to_owned(),
        }
    }
}

/// A backend session opened for one student.
#[derive(Debug)]
pub struct RemoteSession {
    action_url: Url,
    identity: Identity,
}

/// Form that scopes the session to the student and the academic year.
pub fn context_form(identity: &Identity, academic_year: &str) -> String {
    form_urlencoded::Serializer::new(String::new())
        .append_pair("WD_ACTION_", "AJAXPAGE")
        .append_pair("EXECUTE", "47")
        .append_pair("WD_CONTEXTE_", "A33")
        .append_pair("WD_BUTTON_CLICK_", "")
        .append_pair("A9", "1")
        .append_pair("A9_DEB", "1")
        .append_pair("_A9_OCC", "1")
        .append_pair("A33", "3")
        .append_pair("A7", "-1")
        .append_pair("A7_DEB", "1")
        .append_pair("_A7_OCC", "1")
        .append_pair("A16", &identity.name)
        .append_pair("A3", &identity.email)
        .append_pair("A4", academic_year)
        .append_pair("A8", &identity.student_id)
        .append_pair("A27", "-1")
        .append_pair("A27_DEB", "1")
        .append_pair("_A27_OCC", "49")
        .finish()
}

/// Step 1: load the connect page and resolve the session url it declares.
#[instrument(skip_all, fields(base = %backend.base), level = Level::TRACE)]
pub async fn bootstrap<T: Transport>(transport: &T, backend: &Backend) -> Result<Url> {
    let connect = backend.base.join(CONNECT_PATH)?;
    let body = transport.fetch_page(&connect).await?;
    let action = parse::action_url(&body)?;
    let url = backend.base.join(action)?;
    log::trace!("session url is {url}");
    Ok(url)
}

/// Step 2: post the student's identity. The response carries nothing we need.
#[instrument(skip_all, fields(url = %action_url), level = Level::TRACE)]
pub async fn open_context<T: Transport>(
    transport: &T,
    action_url: Url,
    identity: Identity,
    academic_year: &str,
) -> Result<RemoteSession> {
    let body = context_form(&identity, academic_year);
    transport.submit_form(&action_url, body).await?;
    Ok(RemoteSession {
        action_url,
        identity,
    })
}

/// Step 3: ask for the notes table and keep the rows that carry a mark.
#[instrument(skip_all, fields(student = %session.identity.student_id), level = Level::TRACE)]
pub async fn fetch_rows<T: Transport>(
    transport: &T,
    session: &RemoteSession,
) -> Result<Vec<Section>> {
    let start = std::time::Instant::now();
    let body = transport
        .submit_form(&session.action_url, TABLE_REQUEST.to_owned())
        .await?;
    log::trace!("got notes table in \t {:?}", start.elapsed());
    Ok(parse::external_sections(&body)?)
}

/// Runs the three steps in order, stopping at the first failure.
///
/// `identity` is only called once the connect page has handed out a session url.
pub async fn fetch_external_grades<T, F, Fut>(
    transport: &T,
    backend: &Backend,
    identity: F,
) -> Result<Vec<Section>>
where
    T: Transport,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<Identity>>,
{
    let action_url = bootstrap(transport, backend).await?;
    let identity = identity().await?;
    let session = open_context(transport, action_url, identity, &backend.academic_year).await?;
    fetch_rows(transport, &session).await
}

/// Appends the backend's sections after the local ones.
///
/// Failures are logged and dropped; `sections` is then left untouched.
pub async fn append_external_grades<T, F, Fut>(
    sections: &mut Vec<Section>,
    transport: &T,
    backend: &Backend,
    identity: F,
) -> bool
where
    T: Transport,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<Identity>>,
{
    match fetch_external_grades(transport, backend, identity).await {
        Ok(external) => {
            log::info!("fetched {} external sections", external.len());
            sections.extend(external);
            true
        }
        Err(e) => {
            log::warn!("Error while fetching external grades: {e}");
            false
        }
    }
}
