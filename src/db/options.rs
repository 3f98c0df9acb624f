//! Options accepted when creating a collection, and their translation
//! into the operation parameters an execution engine understands.

use crate::operation::CreateCollectionOperation;
use crate::settings::{Collation, WriteConcern};
use bson::{doc, Document};
use serde::{Deserialize, Serialize};

/// How strictly a collection's validator is applied to writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationLevel {
    /// No validation is performed.
    Off,

    /// All inserts and updates are validated.
    Strict,

    /// Updates to documents that already fail validation are let through.
    Moderate,
}

/// What the server does with a write that fails validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationAction {
    /// The write is rejected.
    Error,

    /// The write is accepted and a warning is logged.
    Warn,
}

/// Default storage-engine settings applied to the indexes of a new
/// collection.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct IndexOptionDefaults {
    /// Storage-engine specific index settings, when any were given.
    pub storage_engine: Option<Document>,
}

impl IndexOptionDefaults {
    /// Sets the storage-engine index settings.
    pub fn storage_engine(mut self, storage_engine: Document) -> Self {
        self.storage_engine = Some(storage_engine);
        self
    }
}

/// Document-validation settings for a new collection.
///
/// The three fields are independent; any subset may be given.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ValidationOptions {
    /// The filter documents must match to be accepted.
    pub validator: Option<Document>,

    /// How strictly the validator is applied.
    pub validation_level: Option<ValidationLevel>,

    /// What happens to writes that fail validation.
    pub validation_action: Option<ValidationAction>,
}

impl ValidationOptions {
    /// Sets the validation filter.
    pub fn validator(mut self, validator: Document) -> Self {
        self.validator = Some(validator);
        self
    }

    /// Sets the validation level.
    pub fn validation_level(mut self, validation_level: ValidationLevel) -> Self {
        self.validation_level = Some(validation_level);
        self
    }

    /// Sets the validation action.
    pub fn validation_action(mut self, validation_action: ValidationAction) -> Self {
        self.validation_action = Some(validation_action);
        self
    }
}

/// The options accepted when creating a collection.
///
/// Every optional field defaults to "not specified" and is omitted from
/// the built operation rather than sent as an explicit empty value.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateCollectionOptions {
    /// Whether the collection is capped at a fixed size.
    pub capped: bool,

    /// The maximum size in bytes of a capped collection.
    pub size_in_bytes: Option<i64>,

    /// Whether an index on `_id` is created automatically.
    pub auto_index: bool,

    /// The maximum number of documents in a capped collection.
    pub max_documents: Option<i64>,

    /// Whether record allocations are rounded up to powers of two.
    pub use_power_of_2_sizes: bool,

    /// Storage-engine specific creation options.
    pub storage_engine_options: Option<Document>,

    /// Default storage-engine settings for the collection's indexes.
    pub index_option_defaults: IndexOptionDefaults,

    /// Document-validation settings.
    pub validation_options: ValidationOptions,
}

impl Default for CreateCollectionOptions {
    fn default() -> Self {
        CreateCollectionOptions {
            capped: false,
            size_in_bytes: None,
            auto_index: true,
            max_documents: None,
            use_power_of_2_sizes: false,
            storage_engine_options: None,
            index_option_defaults: IndexOptionDefaults::default(),
            validation_options: ValidationOptions::default(),
        }
    }
}

impl CreateCollectionOptions {
    /// Marks the collection as capped.
    pub fn capped(mut self, capped: bool) -> Self {
        self.capped = capped;
        self
    }

    /// Sets the maximum size in bytes of a capped collection.
    pub fn size_in_bytes(mut self, size_in_bytes: i64) -> Self {
        self.size_in_bytes = Some(size_in_bytes);
        self
    }

    /// Sets whether an `_id` index is created automatically.
    pub fn auto_index(mut self, auto_index: bool) -> Self {
        self.auto_index = auto_index;
        self
    }

    /// Sets the maximum number of documents in a capped collection.
    pub fn max_documents(mut self, max_documents: i64) -> Self {
        self.max_documents = Some(max_documents);
        self
    }

    /// Sets power-of-two record allocation.
    pub fn use_power_of_2_sizes(mut self, use_power_of_2_sizes: bool) -> Self {
        self.use_power_of_2_sizes = use_power_of_2_sizes;
        self
    }

    /// Sets storage-engine specific creation options.
    pub fn storage_engine_options(mut self, storage_engine_options: Document) -> Self {
        self.storage_engine_options = Some(storage_engine_options);
        self
    }

    /// Sets the index option defaults.
    pub fn index_option_defaults(mut self, index_option_defaults: IndexOptionDefaults) -> Self {
        self.index_option_defaults = index_option_defaults;
        self
    }

    /// Sets the validation options.
    pub fn validation_options(mut self, validation_options: ValidationOptions) -> Self {
        self.validation_options = validation_options;
        self
    }
}

/// Builds the create-collection operation for one collection from the
/// caller's options and the owning database's scope.
///
/// Fields with well-defined defaults are copied unconditionally; the
/// nested optional groups only land on the operation when they were
/// actually given, so "not specified" never turns into an explicit
/// empty value on the wire.
pub(crate) fn build_create_collection_operation(
    database_name: &str,
    collection_name: &str,
    options: &CreateCollectionOptions,
    write_concern: &WriteConcern,
    collation: Option<&Collation>,
) -> CreateCollectionOperation {
    let validation = &options.validation_options;
    CreateCollectionOperation {
        database_name: database_name.to_string(),
        collection_name: collection_name.to_string(),
        write_concern: write_concern.clone(),
        capped: options.capped,
        size_in_bytes: options.size_in_bytes,
        auto_index: options.auto_index,
        max_documents: options.max_documents,
        use_power_of_2_sizes: options.use_power_of_2_sizes,
        storage_engine_options: options.storage_engine_options.clone(),
        index_option_defaults: options
            .index_option_defaults
            .storage_engine
            .as_ref()
            .map(|engine| doc! { "storageEngine": engine.clone() }),
        validator: validation.validator.clone(),
        validation_level: validation.validation_level,
        validation_action: validation.validation_action,
        collation: collation.cloned(),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use bson::doc;

    fn build(options: &CreateCollectionOptions) -> CreateCollectionOperation {
        build_create_collection_operation(
            "stockyard",
            "cattle",
            options,
            &WriteConcern::default(),
            None,
        )
    }

    #[test]
    fn defaults_translate_to_a_bare_operation() {
        let operation = build(&CreateCollectionOptions::default());

        assert_eq!(operation.database_name, "stockyard");
        assert_eq!(operation.collection_name, "cattle");
        assert!(!operation.capped);
        assert_eq!(operation.size_in_bytes, None);
        assert!(operation.auto_index, "Expected auto indexing on by default");
        assert_eq!(operation.max_documents, None);
        assert!(!operation.use_power_of_2_sizes);
        assert_eq!(operation.storage_engine_options, None);
        assert_eq!(operation.index_option_defaults, None);
        assert_eq!(operation.validator, None);
        assert_eq!(operation.validation_level, None);
        assert_eq!(operation.validation_action, None);
        assert_eq!(operation.collation, None);
    }

    #[test]
    fn scalar_fields_copy_through() {
        let options = CreateCollectionOptions::default()
            .capped(true)
            .size_in_bytes(4096)
            .max_documents(100)
            .auto_index(false)
            .use_power_of_2_sizes(true);

        let operation = build(&options);
        assert!(operation.capped);
        assert_eq!(operation.size_in_bytes, Some(4096));
        assert_eq!(operation.max_documents, Some(100));
        assert!(!operation.auto_index);
        assert!(operation.use_power_of_2_sizes);
    }

    #[test]
    fn absent_index_storage_engine_stays_absent() {
        let operation = build(&CreateCollectionOptions::default());
        assert_eq!(
            operation.index_option_defaults, None,
            "Expected no index option defaults on the operation",
        );
    }

    #[test]
    fn present_index_storage_engine_is_wrapped() {
        let options = CreateCollectionOptions::default().index_option_defaults(
            IndexOptionDefaults::default().storage_engine(doc! { "foo": 1 }),
        );

        let operation = build(&options);
        assert_eq!(
            operation.index_option_defaults,
            Some(doc! { "storageEngine": { "foo": 1 } }),
            "Expected the engine settings wrapped under a storageEngine key",
        );
    }

    #[test]
    fn validation_fields_translate_independently() {
        // Only the level is given; the other two must stay absent...
        let options = CreateCollectionOptions::default().validation_options(
            ValidationOptions::default().validation_level(ValidationLevel::Strict),
        );

        let operation = build(&options);
        assert_eq!(operation.validation_level, Some(ValidationLevel::Strict));
        assert_eq!(operation.validator, None, "Expected no validator");
        assert_eq!(
            operation.validation_action, None,
            "Expected no validation action",
        );
    }

    #[test]
    fn full_validation_options_translate() {
        let options = CreateCollectionOptions::default().validation_options(
            ValidationOptions::default()
                .validator(doc! { "count": { "$gte": 0 } })
                .validation_level(ValidationLevel::Moderate)
                .validation_action(ValidationAction::Warn),
        );

        let operation = build(&options);
        assert_eq!(operation.validator, Some(doc! { "count": { "$gte": 0 } }));
        assert_eq!(operation.validation_level, Some(ValidationLevel::Moderate));
        assert_eq!(operation.validation_action, Some(ValidationAction::Warn));
    }

    #[test]
    fn collation_comes_from_the_database_scope() {
        let collation = Collation::new("en").strength(2);
        let operation = build_create_collection_operation(
            "stockyard",
            "cattle",
            &CreateCollectionOptions::default(),
            &WriteConcern::majority(),
            Some(&collation),
        );

        assert_eq!(operation.collation, Some(collation));
        assert_eq!(operation.write_concern, WriteConcern::majority());
    }

    #[test]
    fn validation_enums_use_wire_names() -> anyhow::Result<()> {
        let level = bson::to_bson(&ValidationLevel::Moderate)?;
        assert_eq!(level, bson::Bson::String("moderate".to_string()));
        let action = bson::to_bson(&ValidationAction::Warn)?;
        assert_eq!(action, bson::Bson::String("warn".to_string()));
        Ok(())
    }
}
