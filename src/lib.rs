//! # Dashboard Store
//!
//! Local entity store behind an offline admin dashboard. Four collections
//! (customers, products, transactions, users) live in an LMDB environment on
//! the device, one JSON array per collection key, seeded with sample records
//! the first time a key is missing.
//!
//! ## Features
//!
//! - **One generic store**: [`entity_store::EntityStore`] handles every record
//!   kind through the [`local_db_model::LocalDbModel`] contract
//! - **Write-through persistence**: each create, update or delete rewrites the
//!   collection before returning
//! - **Search and facets**: case-insensitive text search ANDed with
//!   categorical filters, `"all"` meaning unconstrained
//! - **Derived fields**: product stock status always follows the stock count
//! - **Quarantine on load**: persisted records that no longer parse are set
//!   aside instead of poisoning the collection
//!
//! ## Quick Start
//!
//! ```no_run
//! use dashboard_store::{open_dashboard, create_record, list_records, free_response};
//! use std::ffi::CString;
//!
//! let path = CString::new("admin_dashboard").unwrap();
//! let handle = open_dashboard(path.as_ptr());
//!
//! let products = CString::new("products").unwrap();
//! let draft = CString::new(r#"{"name":"USB Hub","price":24.5,"stock":3}"#).unwrap();
//! let created = create_record(handle, products.as_ptr(), draft.as_ptr());
//! free_response(created as *mut _);
//!
//! let query = CString::new(r#"{"term":"usb","filters":{"status":"Low Stock"}}"#).unwrap();
//! let listed = list_records(handle, products.as_ptr(), query.as_ptr());
//! free_response(listed as *mut _);
//! ```
//!
//! ## FFI Functions
//!
//! Every function below returns a JSON [`app_response::AppResponse`] string
//! that must be released with [`free_response`]:
//!
//! - [`open_dashboard`] / [`open_dashboard_with_config`] - Open a session
//! - [`list_records`] - Search and filter a collection
//! - [`get_record`] - Fetch one record by id
//! - [`create_record`] - Insert a record from a draft
//! - [`update_record`] - Replace a record by id
//! - [`delete_record`] - Remove a record by id
//! - [`reset_collection`] - Clear a collection back to its sample records
//! - [`dashboard_summary`] - Counts, revenue and restock alerts
//! - [`preview_stock_status`] - Stock tier for a form preview
//! - [`close_dashboard`] - Release the session

pub mod app_response;
pub mod config;
pub mod dashboard;
pub mod derived;
pub mod entities;
pub mod entity_store;
pub mod error;
pub mod form;
pub mod id_gen;
pub mod local_db_model;
pub mod local_db_state;
pub mod query;

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

use log::{info, warn};
use serde_json::Value as JsonValue;

use crate::app_response::AppResponse;
use crate::config::StoreConfig;
use crate::dashboard::{Dashboard, SharedDashboard};
use crate::derived::StockStatus;
use crate::entities::Collection;
use crate::error::StoreResult;
use crate::query::Query;

/// Opens the dashboard stored at `<path>.lmdb` with default settings.
///
/// Collections missing from storage are seeded with their sample records.
///
/// # Returns
///
/// A session handle, or null if the path is null, not UTF-8, or the storage
/// cannot be opened. Release it with [`close_dashboard`].
///
/// # Examples
///
/// ```no_run
/// use std::ffi::CString;
/// use dashboard_store::{open_dashboard, close_dashboard};
///
/// let path = CString::new("admin_dashboard").unwrap();
/// let handle = open_dashboard(path.as_ptr());
/// if !handle.is_null() {
///     close_dashboard(handle);
/// }
/// ```
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn open_dashboard(path: *const c_char) -> *mut SharedDashboard {
    if path.is_null() {
        warn!("Null path pointer passed to open_dashboard");
        return std::ptr::null_mut();
    }

    let path_str = match unsafe { CStr::from_ptr(path).to_str() } {
        Ok(s) => s,
        Err(e) => {
            warn!("Invalid UTF-8 in path parameter: {e}");
            return std::ptr::null_mut();
        }
    };

    open_with(StoreConfig::new(path_str))
}

/// Opens the dashboard described by a JSON [`StoreConfig`].
///
/// Omitted keys take their defaults, e.g.
/// `{"path":"admin_dashboard","map_size":20971520}`.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn open_dashboard_with_config(config_json: *const c_char) -> *mut SharedDashboard {
    if config_json.is_null() {
        warn!("Null config pointer passed to open_dashboard_with_config");
        return std::ptr::null_mut();
    }

    let json = match unsafe { CStr::from_ptr(config_json).to_str() } {
        Ok(s) => s,
        Err(e) => {
            warn!("Invalid UTF-8 in config parameter: {e}");
            return std::ptr::null_mut();
        }
    };

    match StoreConfig::from_json(json) {
        Ok(config) => open_with(config),
        Err(e) => {
            warn!("Rejected dashboard config: {e}");
            std::ptr::null_mut()
        }
    }
}

fn open_with(config: StoreConfig) -> *mut SharedDashboard {
    let dir = config.env_dir();
    info!("Opening dashboard storage at: {}", dir.display());

    match Dashboard::open(config) {
        Ok(dashboard) => {
            info!("✅ Dashboard initialized successfully");
            Box::into_raw(Box::new(SharedDashboard::new(dashboard)))
        }
        Err(e) => {
            warn!("❌ Failed to open dashboard: {e}");
            warn!("Attempted path: {}", dir.display());
            std::ptr::null_mut()
        }
    }
}

/// Lists the records of `collection` visible under `query_json`.
///
/// `query_json` may be null, meaning no search term and no filters. Otherwise
/// it looks like `{"term":"jo","filters":{"status":"Active","role":"all"}}`.
/// The payload is a JSON array in collection order, newest first.
///
/// # Examples
///
/// ```no_run
/// use std::ffi::CString;
/// use dashboard_store::{open_dashboard, list_records};
///
/// let path = CString::new("admin_dashboard").unwrap();
/// let handle = open_dashboard(path.as_ptr());
///
/// let users = CString::new("users").unwrap();
/// let query = CString::new(r#"{"filters":{"role":"Admin"}}"#).unwrap();
/// let admins = list_records(handle, users.as_ptr(), query.as_ptr());
/// ```
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn list_records(
    handle: *mut SharedDashboard,
    collection: *const c_char,
    query_json: *const c_char,
) -> *const c_char {
    let collection = match parse_collection(collection) {
        Ok(c) => c,
        Err(err) => return err,
    };

    let query = if query_json.is_null() {
        Query::everything()
    } else {
        let json = match c_ptr_to_string(query_json, "query") {
            Ok(json) => json,
            Err(err) => return err,
        };
        match serde_json::from_str::<Query>(&json) {
            Ok(query) => query,
            Err(e) => {
                let error = AppResponse::BadRequest(format!("Invalid query: {e}"));
                return response_to_c_string(&error);
            }
        }
    };

    with_dashboard(handle, "list_records", |dashboard| {
        dashboard.list_json(collection, &query)
    })
}

/// Fetches one record of `collection` by id.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn get_record(
    handle: *mut SharedDashboard,
    collection: *const c_char,
    id: *const c_char,
) -> *const c_char {
    let collection = match parse_collection(collection) {
        Ok(c) => c,
        Err(err) => return err,
    };
    let id = match c_ptr_to_string(id, "id") {
        Ok(id) => id,
        Err(err) => return err,
    };

    with_dashboard(handle, "get_record", |dashboard| {
        dashboard.get_json(collection, &id)
    })
}

/// Creates a record in `collection` from a JSON draft.
///
/// The draft carries the business fields without `id`; omitted fields take
/// the form defaults. The store assigns the id, fills derived fields and
/// returns the stored record.
///
/// # Examples
///
/// ```no_run
/// use std::ffi::CString;
/// use dashboard_store::{open_dashboard, create_record};
///
/// let path = CString::new("admin_dashboard").unwrap();
/// let handle = open_dashboard(path.as_ptr());
///
/// let transactions = CString::new("transactions").unwrap();
/// let draft = CString::new(
///     r#"{"customer":"Ana Lopez","amount":42.0,"status":"Completed","paymentMethod":"PayPal"}"#,
/// ).unwrap();
/// let created = create_record(handle, transactions.as_ptr(), draft.as_ptr());
/// ```
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn create_record(
    handle: *mut SharedDashboard,
    collection: *const c_char,
    draft_json: *const c_char,
) -> *const c_char {
    let collection = match parse_collection(collection) {
        Ok(c) => c,
        Err(err) => return err,
    };
    let draft = match parse_json(draft_json, "draft") {
        Ok(draft) => draft,
        Err(err) => return err,
    };

    with_dashboard(handle, "create_record", |dashboard| {
        dashboard.create_json(collection, draft)
    })
}

/// Replaces the record whose `id` matches the supplied full record.
///
/// Returns `NotFound` if no record has that id; nothing is written then.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn update_record(
    handle: *mut SharedDashboard,
    collection: *const c_char,
    record_json: *const c_char,
) -> *const c_char {
    let collection = match parse_collection(collection) {
        Ok(c) => c,
        Err(err) => return err,
    };
    let record = match parse_json(record_json, "record") {
        Ok(record) => record,
        Err(err) => return err,
    };

    with_dashboard(handle, "update_record", |dashboard| {
        dashboard.update_json(collection, record)
    })
}

/// Removes the record with `id` from `collection`.
///
/// Returns the removed record, or `NotFound` if the id is unknown.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn delete_record(
    handle: *mut SharedDashboard,
    collection: *const c_char,
    id: *const c_char,
) -> *const c_char {
    let collection = match parse_collection(collection) {
        Ok(c) => c,
        Err(err) => return err,
    };
    let id = match c_ptr_to_string(id, "id") {
        Ok(id) => id,
        Err(err) => return err,
    };

    with_dashboard(handle, "delete_record", |dashboard| {
        dashboard.delete_json(collection, &id)
    })
}

/// Clears `collection` from storage and reseeds it with its sample records.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn reset_collection(
    handle: *mut SharedDashboard,
    collection: *const c_char,
) -> *const c_char {
    let collection = match parse_collection(collection) {
        Ok(c) => c,
        Err(err) => return err,
    };

    with_dashboard(handle, "reset_collection", |dashboard| {
        dashboard.reset(collection)?;
        Ok(JsonValue::String(format!("Collection '{collection}' was reset successfully")))
    })
}

/// Record counts, completed revenue and restock alerts.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn dashboard_summary(handle: *mut SharedDashboard) -> *const c_char {
    with_dashboard(handle, "dashboard_summary", |dashboard| {
        Ok(serde_json::to_value(dashboard.summary())?)
    })
}

/// Stock tier a product with `stock` units would get, as a JSON string such as
/// `"Low Stock"`. Needs no session; meant for live form previews.
#[no_mangle]
pub extern "C" fn preview_stock_status(stock: f64) -> *const c_char {
    let success = AppResponse::json(&StockStatus::from_stock(stock));
    response_to_c_string(&success)
}

/// Releases a session opened by [`open_dashboard`].
///
/// The handle must not be used afterwards. LMDB flushes and closes the
/// environment when the session drops.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn close_dashboard(handle: *mut SharedDashboard) -> *const c_char {
    if handle.is_null() {
        let error = AppResponse::BadRequest("Null handle passed to close_dashboard".to_string());
        return response_to_c_string(&error);
    }

    drop(unsafe { Box::from_raw(handle) });
    info!("Dashboard session closed");
    response_to_c_string(&AppResponse::success("Dashboard closed successfully"))
}

/// Frees a string returned by any function of this library.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn free_response(ptr: *mut c_char) {
    if ptr.is_null() {
        return;
    }
    drop(unsafe { CString::from_raw(ptr) });
}

/// Locks the session behind `handle` and runs `op`, turning its outcome into
/// a response string.
fn with_dashboard<F>(handle: *mut SharedDashboard, caller: &str, op: F) -> *const c_char
where
    F: FnOnce(&mut Dashboard) -> StoreResult<JsonValue>,
{
    let shared = match unsafe { handle.as_ref() } {
        Some(shared) => shared,
        None => {
            let error = AppResponse::BadRequest(format!("Null handle passed to {caller}"));
            return response_to_c_string(&error);
        }
    };

    let outcome = shared.lock().and_then(|mut dashboard| op(&mut dashboard));
    let response = match outcome {
        Ok(payload) => AppResponse::json(&payload),
        Err(e) => {
            warn!("{caller} failed: {e}");
            AppResponse::from(e)
        }
    };
    response_to_c_string(&response)
}

fn parse_collection(ptr: *const c_char) -> Result<Collection, *const c_char> {
    let name = c_ptr_to_string(ptr, "collection")?;
    name.parse::<Collection>()
        .map_err(|e| response_to_c_string(&AppResponse::from(e)))
}

fn parse_json(ptr: *const c_char, field_name: &str) -> Result<JsonValue, *const c_char> {
    let json = c_ptr_to_string(ptr, field_name)?;
    serde_json::from_str(&json).map_err(|e| {
        let error = AppResponse::SerializationError(format!("Invalid JSON in {field_name}: {e}"));
        response_to_c_string(&error)
    })
}

/// Serializes `response` into a heap C string owned by the caller.
///
/// Returns null if serialization or C string creation fails.
fn response_to_c_string(response: &AppResponse) -> *const c_char {
    let json = match serde_json::to_string(response) {
        Ok(j) => j,
        Err(e) => {
            warn!("Error serializing response: {e}");
            return std::ptr::null();
        }
    };

    match CString::new(json) {
        Ok(c_str) => c_str.into_raw(),
        Err(e) => {
            warn!("Error creating CString: {e}");
            std::ptr::null()
        }
    }
}

/// Converts a C string pointer to an owned `String`, or to a ready-made error
/// response for null pointers and invalid UTF-8.
fn c_ptr_to_string(ptr: *const c_char, field_name: &str) -> Result<String, *const c_char> {
    if ptr.is_null() {
        let error = AppResponse::BadRequest(format!("Null {field_name} pointer"));
        return Err(response_to_c_string(&error));
    }

    match unsafe { CStr::from_ptr(ptr).to_str() } {
        Ok(s) => Ok(s.to_string()),
        Err(e) => {
            let error = AppResponse::BadRequest(format!("Invalid UTF-8 in {field_name}: {e}"));
            Err(response_to_c_string(&error))
        }
    }
}
