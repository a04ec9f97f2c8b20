//! Parameter Tables
//!
//! Item (exercise) and concept parameters, validated once at construction and
//! indexed by id so downstream lookups are single hash probes.

use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::error::{BktError, Result};
use crate::sanitize::ensure_probability;
use crate::types::{Concept, Item, ItemField, Modality};

// ==================== Item Table ====================

#[derive(Debug, Clone, Default)]
pub struct ItemTable {
    items: Vec<Item>,
    index: HashMap<String, usize>,
}

impl ItemTable {
    /// Build a table from typed records.
    ///
    /// Fails on duplicate exercise ids and on `slip`/`guess` outside [0, 1].
    pub fn new(items: Vec<Item>) -> Result<Self> {
        let mut index = HashMap::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            let context = format!("itemParams[{i}]");
            ensure_probability(&format!("{context}.slip"), item.slip)?;
            ensure_probability(&format!("{context}.guess"), item.guess)?;
            if index.insert(item.eid.clone(), i).is_some() {
                return Err(BktError::validation(
                    context,
                    format!("duplicate exercise id {}", item.eid),
                ));
            }
        }
        Ok(Self { items, index })
    }

    /// Build a table from raw `{eid, slip, guess, concept}` records.
    ///
    /// Every record must carry exactly the four [`ItemField`] keys. The
    /// request-level `modality` is stamped on each item.
    pub fn from_json_records(records: &[Value], modality: Modality) -> Result<Self> {
        let items = records
            .iter()
            .enumerate()
            .map(|(i, record)| parse_item_record(i, record, modality))
            .collect::<Result<Vec<_>>>()?;
        Self::new(items)
    }

    pub fn get(&self, eid: &str) -> Option<&Item> {
        self.index.get(eid).map(|&i| &self.items[i])
    }

    pub fn lookup(&self, eid: &str) -> Result<&Item> {
        self.get(eid).ok_or_else(|| BktError::unknown_exercise(eid))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

fn parse_item_record(index: usize, record: &Value, modality: Modality) -> Result<Item> {
    let context = format!("itemParams[{index}]");
    let fields = record
        .as_object()
        .ok_or_else(|| BktError::validation(&context, "record is not an object"))?;

    if fields.len() != ItemField::ALL.len() {
        return Err(BktError::validation(
            &context,
            format!(
                "expected {} fields, found {}",
                ItemField::ALL.len(),
                fields.len()
            ),
        ));
    }
    if let Some(unknown) = fields.keys().find(|key| ItemField::from_key(key).is_none()) {
        return Err(BktError::validation(
            &context,
            format!("unexpected field {unknown}"),
        ));
    }

    Ok(Item {
        eid: string_field(&context, fields, ItemField::Eid)?,
        concept: string_field(&context, fields, ItemField::Concept)?,
        slip: number_field(&context, fields, ItemField::Slip)?,
        guess: number_field(&context, fields, ItemField::Guess)?,
        modality,
    })
}

fn field<'a>(context: &str, fields: &'a Map<String, Value>, key: ItemField) -> Result<&'a Value> {
    fields
        .get(key.as_str())
        .ok_or_else(|| BktError::validation(context, format!("missing field {}", key.as_str())))
}

fn string_field(context: &str, fields: &Map<String, Value>, key: ItemField) -> Result<String> {
    match field(context, fields, key)? {
        Value::String(s) => Ok(s.clone()),
        other => Err(BktError::validation(
            context,
            format!("field {} must be a string, got {other}", key.as_str()),
        )),
    }
}

fn number_field(context: &str, fields: &Map<String, Value>, key: ItemField) -> Result<f64> {
    field(context, fields, key)?.as_f64().ok_or_else(|| {
        BktError::validation(context, format!("field {} must be a number", key.as_str()))
    })
}

// ==================== Concept Table ====================

#[derive(Debug, Clone, Default)]
pub struct ConceptTable {
    concepts: Vec<Concept>,
    index: HashMap<(String, Modality), usize>,
}

impl ConceptTable {
    /// Build a table from typed records.
    ///
    /// `(id, modality)` pairs must be unique; `init` and `transfer` must lie in [0, 1].
    pub fn new(concepts: Vec<Concept>) -> Result<Self> {
        let mut index = HashMap::with_capacity(concepts.len());
        for (i, concept) in concepts.iter().enumerate() {
            let context = format!("conceptParams[{i}]");
            ensure_probability(&format!("{context}.init"), concept.init)?;
            ensure_probability(&format!("{context}.transfer"), concept.transfer)?;
            if index
                .insert((concept.id.clone(), concept.modality), i)
                .is_some()
            {
                return Err(BktError::validation(
                    context,
                    format!(
                        "duplicate concept {} for modality {}",
                        concept.id, concept.modality
                    ),
                ));
            }
        }
        Ok(Self { concepts, index })
    }

    pub fn lookup(&self, concept: &str, modality: Modality) -> Result<&Concept> {
        self.index
            .get(&(concept.to_string(), modality))
            .map(|&i| &self.concepts[i])
            .ok_or_else(|| BktError::UnknownConcept {
                concept: concept.to_string(),
                modality: Some(modality),
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Concept> {
        self.concepts.iter()
    }

    pub fn len(&self) -> usize {
        self.concepts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.concepts.is_empty()
    }
}
