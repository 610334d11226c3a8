// storage/src/patient_store.rs

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use log::{debug, error};
use rusqlite::types::Value as SqlValue;
use rusqlite::{Connection, Row, params, params_from_iter};
use serde_json::{Map, Value};

use models::columns::{PATIENT_COLUMNS, PATIENT_ID_COLUMN};

use crate::errors::{StorageError, StorageResult};

const CREATE_PATIENTS_TABLE: &str = "CREATE TABLE IF NOT EXISTS patients (
    patient_id TEXT PRIMARY KEY,
    patient_name TEXT NOT NULL,
    patient_age INTEGER NOT NULL,
    patient_gender TEXT NOT NULL,
    patient_checkin TEXT NOT NULL,
    patient_checkout TEXT,
    patient_ward INTEGER NOT NULL,
    patient_room INTEGER NOT NULL
)";

const INSERT_PATIENT: &str = "INSERT INTO patients (patient_id, patient_name, patient_age, \
     patient_gender, patient_checkin, patient_checkout, patient_ward, patient_room) \
     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)";

const SELECT_ALL_PATIENTS: &str = "SELECT patient_id, patient_name, patient_age, patient_gender, \
     patient_checkin, patient_checkout, patient_ward, patient_room FROM patients";

const SELECT_ONE_PATIENT: &str = "SELECT patient_id, patient_name, patient_age, patient_gender, \
     patient_checkin, patient_checkout, patient_ward, patient_room FROM patients \
     WHERE patient_id = ?1";

const DELETE_PATIENT: &str = "DELETE FROM patients WHERE patient_id = ?1";

/// Persistence gateway for patient rows.
///
/// The store owns a single connection with an explicit lifecycle: opened at
/// service start, dropped at shutdown. Each operation acquires the connection
/// for exactly its own duration and executes one autocommitted statement, so
/// the handle is released on every exit path. Payloads cross this boundary as
/// field mappings keyed by the canonical column names; the store has no
/// dependency on the in-memory patient type.
pub struct PatientStore {
    conn: Mutex<Connection>,
}

impl PatientStore {
    /// Opens (creating if necessary) the patient database at `path` and
    /// ensures the patients table exists.
    pub fn open<P: AsRef<Path>>(path: P) -> StorageResult<Self> {
        Self::with_connection(Connection::open(path)?)
    }

    /// Opens a private in-memory database. Used by tests and demos.
    pub fn open_in_memory() -> StorageResult<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> StorageResult<Self> {
        conn.execute(CREATE_PATIENTS_TABLE, [])?;
        debug!("patients table ready");
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn connection(&self) -> StorageResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|err| StorageError::Lock(err.to_string()))
    }

    /// Inserts one patient row and returns its primary key.
    ///
    /// The payload must carry all canonical columns. Storage-level failures
    /// (constraint violations included) are logged and returned as the error
    /// arm; nothing panics past this boundary.
    pub fn insert(&self, payload: &Map<String, Value>) -> StorageResult<String> {
        logged("inserting the patient", self.try_insert(payload))
    }

    fn try_insert(&self, payload: &Map<String, Value>) -> StorageResult<String> {
        let mut values = Vec::with_capacity(PATIENT_COLUMNS.len());
        for column in PATIENT_COLUMNS {
            let value = payload.get(column).ok_or_else(|| {
                StorageError::MalformedPayload(format!("missing column {column}"))
            })?;
            values.push(json_to_sql(column, value)?);
        }
        let id = payload[PATIENT_ID_COLUMN]
            .as_str()
            .ok_or_else(|| {
                StorageError::MalformedPayload(format!("{PATIENT_ID_COLUMN} must be a string"))
            })?
            .to_string();

        let conn = self.connection()?;
        conn.execute(INSERT_PATIENT, params_from_iter(values))?;
        Ok(id)
    }

    /// Returns every patient row as a field mapping, in insertion order.
    /// An empty table is an empty vector, not a failure.
    pub fn select_all(&self) -> StorageResult<Vec<Map<String, Value>>> {
        logged("selecting all patients", self.try_select_all())
    }

    fn try_select_all(&self) -> StorageResult<Vec<Map<String, Value>>> {
        let conn = self.connection()?;
        let mut stmt = conn.prepare(SELECT_ALL_PATIENTS)?;
        let rows = stmt.query_map([], row_to_map)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Returns the row matching `id`, or `Ok(None)` when no such patient
    /// exists. Absence is a non-error outcome, distinct from a storage
    /// failure.
    pub fn select_one(&self, id: &str) -> StorageResult<Option<Map<String, Value>>> {
        logged("selecting the patient", self.try_select_one(id))
    }

    fn try_select_one(&self, id: &str) -> StorageResult<Option<Map<String, Value>>> {
        let conn = self.connection()?;
        let mut stmt = conn.prepare(SELECT_ONE_PATIENT)?;
        match stmt.query_row(params![id], row_to_map) {
            Ok(row) => Ok(Some(row)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    /// Applies the given field/value pairs to the row matching `id` and
    /// returns the affected-row count (0 when no row matched). Fields outside
    /// the canonical column set are rejected.
    pub fn update(&self, id: &str, changes: &Map<String, Value>) -> StorageResult<usize> {
        logged("updating the patient", self.try_update(id, changes))
    }

    fn try_update(&self, id: &str, changes: &Map<String, Value>) -> StorageResult<usize> {
        if changes.is_empty() {
            return Err(StorageError::MalformedPayload(
                "no fields to update".to_string(),
            ));
        }
        let mut assignments = Vec::with_capacity(changes.len());
        let mut values = Vec::with_capacity(changes.len() + 1);
        for (field, value) in changes {
            if !PATIENT_COLUMNS.contains(&field.as_str()) {
                return Err(StorageError::MalformedPayload(format!(
                    "unknown column {field}"
                )));
            }
            values.push(json_to_sql(field, value)?);
            assignments.push(format!("{field} = ?{}", values.len()));
        }
        values.push(SqlValue::Text(id.to_string()));
        let statement = format!(
            "UPDATE patients SET {} WHERE patient_id = ?{}",
            assignments.join(", "),
            values.len()
        );

        let conn = self.connection()?;
        Ok(conn.execute(&statement, params_from_iter(values))?)
    }

    /// Removes the row matching `id` and returns the affected-row count.
    pub fn delete(&self, id: &str) -> StorageResult<usize> {
        logged("deleting the patient", self.try_delete(id))
    }

    fn try_delete(&self, id: &str) -> StorageResult<usize> {
        let conn = self.connection()?;
        Ok(conn.execute(DELETE_PATIENT, params![id])?)
    }
}

fn logged<T>(operation: &str, result: StorageResult<T>) -> StorageResult<T> {
    if let Err(ref err) = result {
        error!("error occurred while {operation}: {err}");
    }
    result
}

fn row_to_map(row: &Row<'_>) -> rusqlite::Result<Map<String, Value>> {
    let mut map = Map::new();
    for (index, column) in PATIENT_COLUMNS.iter().enumerate() {
        let value: SqlValue = row.get(index)?;
        map.insert((*column).to_string(), sql_to_json(value));
    }
    Ok(map)
}

fn sql_to_json(value: SqlValue) -> Value {
    match value {
        SqlValue::Null => Value::Null,
        SqlValue::Integer(i) => Value::from(i),
        SqlValue::Real(r) => serde_json::Number::from_f64(r)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        SqlValue::Text(s) => Value::String(s),
        // The patient schema stores no blobs.
        SqlValue::Blob(_) => Value::Null,
    }
}

fn json_to_sql(column: &str, value: &Value) -> StorageResult<SqlValue> {
    match value {
        Value::Null => Ok(SqlValue::Null),
        Value::Bool(b) => Ok(SqlValue::Integer(*b as i64)),
        Value::Number(n) => n
            .as_i64()
            .map(SqlValue::Integer)
            .or_else(|| n.as_f64().map(SqlValue::Real))
            .ok_or_else(|| {
                StorageError::MalformedPayload(format!("column {column} has unrepresentable number {n}"))
            }),
        Value::String(s) => Ok(SqlValue::Text(s.clone())),
        Value::Array(_) | Value::Object(_) => Err(StorageError::MalformedPayload(format!(
            "column {column} must be a scalar"
        ))),
    }
}
