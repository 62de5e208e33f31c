//! Hands a finished flight log to the browser as a file download.

use chronos::ChronosError;
use wasm_bindgen::JsCast;
use web_sys::HtmlAnchorElement;

use crate::config::{CSV_DATA_URI_PREFIX, EXPORT_FILE_PREFIX};

/// `chronos_flight_log_<epoch ms>.csv`
pub fn export_filename(now_epoch_ms: f64) -> String {
    format!("{}{}.csv", EXPORT_FILE_PREFIX, now_epoch_ms.max(0.0) as u64)
}

/// Click a throwaway anchor whose href carries the CSV as a data URI.
pub fn download_csv(csv: &str) -> Result<(), ChronosError> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or(ChronosError::Dom("no document"))?;

    let link: HtmlAnchorElement = document
        .create_element("a")
        .map_err(|_| ChronosError::Dom("create anchor"))?
        .dyn_into()
        .map_err(|_| ChronosError::Dom("anchor cast"))?;

    let encoded = String::from(js_sys::encode_uri(csv));
    link.set_href(&format!("{}{}", CSV_DATA_URI_PREFIX, encoded));
    link.set_download(&export_filename(js_sys::Date::now()));
    link.click();
    Ok(())
}
