//! Python bindings for the view layer
//!
//! Payloads cross the boundary as plain dicts/lists. Tier, section and field
//! names use their wire spelling (`"nightmare"`, `"stayDifficultyConditions"`,
//! `"chickenAt"`); list entries are addressed by the integer ids returned
//! from `config_ids` / `run_ids` / `add_*`.

use pyo3::exceptions::PyKeyError;
use pyo3::prelude::*;
use pyo3::types::{PyAnyMethods, PyBool, PyDict, PyDictMethods, PyFloat, PyInt, PyList, PyListMethods, PyString};
use serde_json::{Map, Number, Value};

use crate::catalog::{
    self, ConditionKey, HealthField, RunSection, Tier, HEALTH_FIELDS, RENDER_PIPELINE, RUN_SECTIONS,
};
use crate::editor::{EditorView, LevelBound, MoveTo, SequenceEditor};
use crate::error::SequenceError;
use crate::identity::{EntryId, Tracked};
use crate::model::{
    ConditionField, ConditionFlag, RunFlag, CONDITION_FIELDS, CONDITION_FLAGS, RUN_FLAGS,
};

// ============================================================================
// Value Conversion
// ============================================================================

/// Convert a Python object into a JSON value.
///
/// Anything that is not a dict, list, str, number, bool or None becomes
/// null, which hydration treats as absent.
fn to_value(obj: &Bound<'_, PyAny>) -> PyResult<Value> {
    if obj.is_none() {
        return Ok(Value::Null);
    }
    // bool is a subclass of int, check it first
    if obj.is_instance_of::<PyBool>() {
        return Ok(Value::Bool(obj.extract()?));
    }
    if obj.is_instance_of::<PyInt>() {
        return Ok(match obj.extract::<i64>() {
            Ok(n) => Value::from(n),
            Err(_) => float_value(obj.extract()?),
        });
    }
    if obj.is_instance_of::<PyFloat>() {
        return Ok(float_value(obj.extract()?));
    }
    if obj.is_instance_of::<PyString>() {
        return Ok(Value::String(obj.extract()?));
    }
    if let Ok(dict) = obj.downcast::<PyDict>() {
        let mut map = Map::with_capacity(dict.len());
        for (key, value) in dict.iter() {
            map.insert(key.str()?.extract()?, to_value(&value)?);
        }
        return Ok(Value::Object(map));
    }
    if let Ok(list) = obj.downcast::<PyList>() {
        return list.iter().map(|item| to_value(&item)).collect::<PyResult<Vec<_>>>().map(Value::Array);
    }
    Ok(Value::Null)
}

#[inline]
fn float_value(n: f64) -> Value {
    Number::from_f64(n).map(Value::Number).unwrap_or(Value::Null)
}

/// Convert a JSON value into Python objects through the `json` module
fn to_python(py: Python<'_>, value: &Value) -> PyResult<Py<PyAny>> {
    let text = serde_json::to_string(value).map_err(SequenceError::from)?;
    Ok(py.import("json")?.call_method1("loads", (text,))?.unbind())
}

fn parse<T: std::str::FromStr<Err = SequenceError>>(name: &str) -> PyResult<T> {
    Ok(name.parse::<T>()?)
}

fn condition_field(name: &str) -> PyResult<ConditionField> {
    CONDITION_FIELDS
        .into_iter()
        .find(|field| field.key() == name)
        .ok_or_else(|| PyKeyError::new_err(format!("Unknown condition field: {}", name)))
}

fn condition_flag(name: &str) -> PyResult<ConditionFlag> {
    CONDITION_FLAGS
        .into_iter()
        .find(|flag| flag.key() == name)
        .ok_or_else(|| PyKeyError::new_err(format!("Unknown condition flag: {}", name)))
}

fn run_flag(name: &str) -> PyResult<RunFlag> {
    RUN_FLAGS
        .into_iter()
        .find(|flag| flag.key() == name)
        .ok_or_else(|| PyKeyError::new_err(format!("Unknown run flag: {}", name)))
}

fn level_bound(name: &str) -> PyResult<LevelBound> {
    match name {
        "min" | "minLevel" => Ok(LevelBound::Min),
        "max" | "maxLevel" => Ok(LevelBound::Max),
        _ => Err(PyKeyError::new_err(format!("Unknown level bound: {}", name))),
    }
}

/// Resolve an id handed out to Python back to the entry identity
fn entry_id<T>(list: &[Tracked<T>], raw: u64) -> PyResult<EntryId> {
    list.iter()
        .filter_map(|entry| entry.uid())
        .find(|uid| uid.get() == raw)
        .ok_or_else(|| PyKeyError::new_err(format!("Entry not found: #{}", raw)))
}

// ============================================================================
// View Adapter
// ============================================================================

/// Forwards editor callbacks to an optional Python view object.
///
/// The editor is mutably borrowed while callbacks run, so a Python `render`
/// that calls back into the editor gets a borrow error; that error is logged
/// and the edit still completes.
struct PyView<'py> {
    view: Option<Bound<'py, PyAny>>,
}

impl<'py> PyView<'py> {
    fn new(view: Option<Bound<'py, PyAny>>) -> Self {
        Self {
            view: view.filter(|v| !v.is_none()),
        }
    }
}

impl EditorView for PyView<'_> {
    fn mark_dirty(&mut self) {
        if let Some(view) = &self.view {
            if let Err(err) = view.call_method0("mark_dirty") {
                log::warn!("view mark_dirty failed: {}", err);
            }
        }
    }

    fn render(&mut self, _editor: &mut SequenceEditor, tier: Tier) {
        if let Some(view) = &self.view {
            if let Err(err) = view.call_method1("render", (tier.as_str(),)) {
                log::warn!("view render({}) failed: {}", tier, err);
            }
        }
    }

    fn confirm(&mut self, prompt: &str) -> bool {
        let Some(view) = &self.view else {
            return true;
        };
        match view
            .call_method1("confirm", (prompt,))
            .and_then(|answer| answer.is_truthy())
        {
            Ok(answer) => answer,
            Err(err) => {
                log::warn!("view confirm failed: {}", err);
                false
            }
        }
    }
}

// ============================================================================
// Editor Class
// ============================================================================

/// Editing session over one sequence
#[pyclass(name = "SequenceEditor", module = "sequence_editor_core")]
pub struct PySequenceEditor {
    inner: SequenceEditor,
}

#[pymethods]
impl PySequenceEditor {
    /// Create a session from a stored payload, or an empty sequence
    #[new]
    #[pyo3(signature = (payload=None))]
    fn new(payload: Option<&Bound<'_, PyAny>>) -> PyResult<Self> {
        let inner = match payload {
            Some(payload) if !payload.is_none() => SequenceEditor::hydrate(&to_value(payload)?),
            _ => SequenceEditor::empty(),
        };
        Ok(Self { inner })
    }

    /// Minimal payload for saving
    fn payload(&self, py: Python<'_>) -> PyResult<Py<PyAny>> {
        let value = self.inner.serialize().to_value()?;
        to_python(py, &value)
    }

    /// Minimal payload as JSON text
    fn payload_json(&self) -> PyResult<String> {
        Ok(self.inner.serialize().to_json_string()?)
    }

    // ------------------------------------------------------------------------
    // Conditions
    // ------------------------------------------------------------------------

    #[pyo3(signature = (tier, key, enabled, view=None))]
    fn toggle_condition<'py>(
        &mut self,
        tier: &str,
        key: &str,
        enabled: bool,
        view: Option<Bound<'py, PyAny>>,
    ) -> PyResult<()> {
        let mut view = PyView::new(view);
        Ok(self
            .inner
            .toggle_condition(parse(tier)?, parse(key)?, enabled, &mut view)?)
    }

    #[pyo3(signature = (tier, key, field, value, view=None))]
    fn set_condition_value<'py>(
        &mut self,
        tier: &str,
        key: &str,
        field: &str,
        value: &Bound<'py, PyAny>,
        view: Option<Bound<'py, PyAny>>,
    ) -> PyResult<()> {
        let value = crate::coerce::parse_optional_number(&to_value(value)?);
        let mut view = PyView::new(view);
        Ok(self.inner.set_condition_value(
            parse(tier)?,
            parse(key)?,
            condition_field(field)?,
            value,
            &mut view,
        )?)
    }

    #[pyo3(signature = (tier, key, flag, enabled, view=None))]
    fn set_condition_flag<'py>(
        &mut self,
        tier: &str,
        key: &str,
        flag: &str,
        enabled: bool,
        view: Option<Bound<'py, PyAny>>,
    ) -> PyResult<()> {
        let mut view = PyView::new(view);
        Ok(self.inner.set_condition_flag(
            parse(tier)?,
            parse(key)?,
            condition_flag(flag)?,
            enabled,
            &mut view,
        )?)
    }

    #[pyo3(signature = (tier, key, enabled, view=None))]
    fn set_condition_editing<'py>(
        &mut self,
        tier: &str,
        key: &str,
        enabled: bool,
        view: Option<Bound<'py, PyAny>>,
    ) -> PyResult<()> {
        let mut view = PyView::new(view);
        Ok(self
            .inner
            .set_condition_editing(parse(tier)?, parse(key)?, enabled, &mut view)?)
    }

    fn is_condition_editing(&self, tier: &str, key: &str) -> PyResult<bool> {
        let key: ConditionKey = parse(key)?;
        Ok(self.inner.is_condition_editing(parse(tier)?, key))
    }

    fn condition_summary(&self, tier: &str, key: &str) -> PyResult<String> {
        let key: ConditionKey = parse(key)?;
        Ok(self.inner.condition_summary(parse(tier)?, key))
    }

    // ------------------------------------------------------------------------
    // Config overrides
    // ------------------------------------------------------------------------

    /// Ids of the config overrides of a tier, in list order
    fn config_ids(&self, tier: &str) -> PyResult<Vec<u64>> {
        let tier: Tier = parse(tier)?;
        Ok(self.inner.model()[tier]
            .config_settings
            .iter()
            .map(|entry| entry.ensure_uid().get())
            .collect())
    }

    #[pyo3(signature = (tier, view=None))]
    fn add_config<'py>(&mut self, tier: &str, view: Option<Bound<'py, PyAny>>) -> PyResult<u64> {
        let mut view = PyView::new(view);
        Ok(self.inner.add_config(parse(tier)?, &mut view).get())
    }

    /// Remove an override; returns False if the view declined
    #[pyo3(signature = (tier, uid, view=None))]
    fn remove_config<'py>(
        &mut self,
        tier: &str,
        uid: u64,
        view: Option<Bound<'py, PyAny>>,
    ) -> PyResult<bool> {
        let tier: Tier = parse(tier)?;
        let uid = entry_id(&self.inner.model()[tier].config_settings, uid)?;
        let mut view = PyView::new(view);
        Ok(self.inner.remove_config(tier, uid, &mut view)?)
    }

    #[pyo3(signature = (tier, uid, index, view=None))]
    fn move_config<'py>(
        &mut self,
        tier: &str,
        uid: u64,
        index: usize,
        view: Option<Bound<'py, PyAny>>,
    ) -> PyResult<bool> {
        let tier: Tier = parse(tier)?;
        let uid = entry_id(&self.inner.model()[tier].config_settings, uid)?;
        let mut view = PyView::new(view);
        Ok(self
            .inner
            .reorder_configs(tier, &mut MoveTo { uid, index }, &mut view))
    }

    #[pyo3(signature = (tier, uid, level, view=None))]
    fn set_config_level<'py>(
        &mut self,
        tier: &str,
        uid: u64,
        level: &Bound<'py, PyAny>,
        view: Option<Bound<'py, PyAny>>,
    ) -> PyResult<()> {
        let tier: Tier = parse(tier)?;
        let uid = entry_id(&self.inner.model()[tier].config_settings, uid)?;
        let level = crate::coerce::parse_optional_number(&to_value(level)?);
        let mut view = PyView::new(view);
        Ok(self.inner.set_config_level(tier, uid, level, &mut view)?)
    }

    #[pyo3(signature = (tier, uid, field, value, view=None))]
    fn set_health_value<'py>(
        &mut self,
        tier: &str,
        uid: u64,
        field: &str,
        value: &Bound<'py, PyAny>,
        view: Option<Bound<'py, PyAny>>,
    ) -> PyResult<()> {
        let tier: Tier = parse(tier)?;
        let field: HealthField = parse(field)?;
        let uid = entry_id(&self.inner.model()[tier].config_settings, uid)?;
        let value = crate::coerce::parse_optional_number(&to_value(value)?);
        let mut view = PyView::new(view);
        Ok(self.inner.set_health_value(tier, uid, field, value, &mut view)?)
    }

    #[pyo3(signature = (tier, uid, enabled, view=None))]
    fn set_config_editing<'py>(
        &mut self,
        tier: &str,
        uid: u64,
        enabled: bool,
        view: Option<Bound<'py, PyAny>>,
    ) -> PyResult<()> {
        let tier: Tier = parse(tier)?;
        let uid = entry_id(&self.inner.model()[tier].config_settings, uid)?;
        let mut view = PyView::new(view);
        self.inner.set_config_editing(tier, uid, enabled, &mut view);
        Ok(())
    }

    fn is_config_editing(&self, tier: &str, uid: u64) -> PyResult<bool> {
        let tier: Tier = parse(tier)?;
        let uid = entry_id(&self.inner.model()[tier].config_settings, uid)?;
        Ok(self.inner.editing().is_config_editing(tier, uid))
    }

    fn config_summary(&self, tier: &str, uid: u64) -> PyResult<String> {
        let tier: Tier = parse(tier)?;
        let uid = entry_id(&self.inner.model()[tier].config_settings, uid)?;
        Ok(self.inner.config_summary(tier, uid)?)
    }

    // ------------------------------------------------------------------------
    // Run lists
    // ------------------------------------------------------------------------

    /// Ids of the runs in one section of a tier, in list order
    fn run_ids(&self, tier: &str, section: &str) -> PyResult<Vec<u64>> {
        let tier: Tier = parse(tier)?;
        let section: RunSection = parse(section)?;
        Ok(self.inner.model()[tier]
            .runs(section)
            .iter()
            .map(|entry| entry.ensure_uid().get())
            .collect())
    }

    #[pyo3(signature = (tier, section, view=None))]
    fn add_run<'py>(
        &mut self,
        tier: &str,
        section: &str,
        view: Option<Bound<'py, PyAny>>,
    ) -> PyResult<u64> {
        let mut view = PyView::new(view);
        Ok(self
            .inner
            .add_run(parse(tier)?, parse(section)?, &mut view)
            .get())
    }

    #[pyo3(signature = (tier, section, uid, view=None))]
    fn remove_run<'py>(
        &mut self,
        tier: &str,
        section: &str,
        uid: u64,
        view: Option<Bound<'py, PyAny>>,
    ) -> PyResult<bool> {
        let tier: Tier = parse(tier)?;
        let section: RunSection = parse(section)?;
        let uid = entry_id(self.inner.model()[tier].runs(section), uid)?;
        let mut view = PyView::new(view);
        Ok(self.inner.remove_run(tier, section, uid, &mut view)?)
    }

    #[pyo3(signature = (tier, section, uid, run, view=None))]
    fn set_run_name<'py>(
        &mut self,
        tier: &str,
        section: &str,
        uid: u64,
        run: &str,
        view: Option<Bound<'py, PyAny>>,
    ) -> PyResult<()> {
        let tier: Tier = parse(tier)?;
        let section: RunSection = parse(section)?;
        let uid = entry_id(self.inner.model()[tier].runs(section), uid)?;
        let mut view = PyView::new(view);
        Ok(self.inner.set_run_name(tier, section, uid, run, &mut view)?)
    }

    #[pyo3(signature = (tier, section, uid, index, view=None))]
    fn move_run<'py>(
        &mut self,
        tier: &str,
        section: &str,
        uid: u64,
        index: usize,
        view: Option<Bound<'py, PyAny>>,
    ) -> PyResult<bool> {
        let tier: Tier = parse(tier)?;
        let section: RunSection = parse(section)?;
        let uid = entry_id(self.inner.model()[tier].runs(section), uid)?;
        let mut view = PyView::new(view);
        Ok(self
            .inner
            .reorder_runs(tier, section, &mut MoveTo { uid, index }, &mut view))
    }

    /// Set `"min"` or `"max"` level of a run; the value is rounded and clamped
    #[pyo3(signature = (tier, section, uid, bound, level, view=None))]
    fn set_run_level<'py>(
        &mut self,
        tier: &str,
        section: &str,
        uid: u64,
        bound: &str,
        level: &Bound<'py, PyAny>,
        view: Option<Bound<'py, PyAny>>,
    ) -> PyResult<()> {
        let tier: Tier = parse(tier)?;
        let section: RunSection = parse(section)?;
        let uid = entry_id(self.inner.model()[tier].runs(section), uid)?;
        let level = crate::coerce::parse_optional_number(&to_value(level)?);
        let mut view = PyView::new(view);
        Ok(self
            .inner
            .set_run_level(tier, section, uid, level_bound(bound)?, level, &mut view)?)
    }

    #[pyo3(signature = (tier, section, uid, flag, enabled, view=None))]
    fn set_run_flag<'py>(
        &mut self,
        tier: &str,
        section: &str,
        uid: u64,
        flag: &str,
        enabled: bool,
        view: Option<Bound<'py, PyAny>>,
    ) -> PyResult<()> {
        let tier: Tier = parse(tier)?;
        let section: RunSection = parse(section)?;
        let uid = entry_id(self.inner.model()[tier].runs(section), uid)?;
        let mut view = PyView::new(view);
        Ok(self
            .inner
            .set_run_flag(tier, section, uid, run_flag(flag)?, enabled, &mut view)?)
    }

    #[pyo3(signature = (tier, uid, enabled, view=None))]
    fn set_run_editing<'py>(
        &mut self,
        tier: &str,
        uid: u64,
        enabled: bool,
        view: Option<Bound<'py, PyAny>>,
    ) -> PyResult<()> {
        let tier: Tier = parse(tier)?;
        let uid = self.run_id(tier, uid)?;
        let mut view = PyView::new(view);
        self.inner.set_run_editing(tier, uid, enabled, &mut view);
        Ok(())
    }

    fn is_run_editing(&self, tier: &str, uid: u64) -> PyResult<bool> {
        let tier: Tier = parse(tier)?;
        let uid = self.run_id(tier, uid)?;
        Ok(self.inner.editing().is_run_editing(tier, uid))
    }
}

impl PySequenceEditor {
    /// Find a run id in any section of `tier`
    fn run_id(&self, tier: Tier, raw: u64) -> PyResult<EntryId> {
        let settings = &self.inner.model()[tier];
        RUN_SECTIONS
            .into_iter()
            .find_map(|section| entry_id(settings.runs(section), raw).ok())
            .ok_or_else(|| PyKeyError::new_err(format!("Entry not found: #{}", raw)))
    }
}

// ============================================================================
// Module Functions
// ============================================================================

/// Hydrate a stored payload and return its normalized minimal form
#[pyfunction]
fn hydrate(py: Python<'_>, payload: &Bound<'_, PyAny>) -> PyResult<Py<PyAny>> {
    let model = crate::adapter::hydrate(&to_value(payload)?);
    let value = crate::adapter::serialize(&model).to_value()?;
    to_python(py, &value)
}

/// Hydrate a stored payload and return its minimal form as JSON text
#[pyfunction]
fn serialize(payload: &Bound<'_, PyAny>) -> PyResult<String> {
    let model = crate::adapter::hydrate(&to_value(payload)?);
    Ok(crate::adapter::serialize(&model).to_json_string()?)
}

/// Health fields in display order
#[pyfunction]
fn health_fields(py: Python<'_>) -> PyResult<Bound<'_, PyList>> {
    let list = PyList::empty(py);
    for def in HEALTH_FIELDS.iter() {
        let dict = PyDict::new(py);
        dict.set_item("key", def.key)?;
        dict.set_item("label", def.edit_label)?;
        dict.set_item("summaryLabel", def.summary_label)?;
        list.append(dict)?;
    }
    Ok(list)
}

/// Condition rows a tier shows, in display order
#[pyfunction]
fn condition_sections<'py>(py: Python<'py>, tier: &str) -> PyResult<Bound<'py, PyList>> {
    let tier: Tier = parse(tier)?;
    let list = PyList::empty(py);
    for section in catalog::condition_sections(tier) {
        let dict = PyDict::new(py);
        dict.set_item("key", section.key.as_str())?;
        dict.set_item("title", section.title)?;
        dict.set_item("autoSyncInfo", section.auto_sync_info)?;
        list.append(dict)?;
    }
    Ok(list)
}

/// Editor stages in render order, as `(stage, run_section)` pairs
#[pyfunction]
fn render_pipeline() -> Vec<(&'static str, Option<&'static str>)> {
    RENDER_PIPELINE
        .iter()
        .map(|stage| (stage.as_str(), stage.run_section().map(RunSection::as_str)))
        .collect()
}

/// Python module definition
#[pymodule]
fn sequence_editor_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(hydrate, m)?)?;
    m.add_function(wrap_pyfunction!(serialize, m)?)?;
    m.add_function(wrap_pyfunction!(health_fields, m)?)?;
    m.add_function(wrap_pyfunction!(condition_sections, m)?)?;
    m.add_function(wrap_pyfunction!(render_pipeline, m)?)?;
    m.add_class::<PySequenceEditor>()?;
    Ok(())
}
