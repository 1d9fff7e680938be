use std::fmt;

// === StoreError ===

/// Errors raised by the record store.
#[derive(Debug)]
pub enum StoreError {
    /// Record with the given ID was not found.
    NotFound(i64),
    /// An update tried to change a write-once field.
    ImmutableField(String),
    /// A stored row could not be decoded into a record.
    Corrupt(String),
    /// Database operation failed.
    Database(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::NotFound(id) => write!(f, "Record not found: {}", id),
            StoreError::ImmutableField(field) => {
                write!(f, "Record field cannot be changed: {}", field)
            }
            StoreError::Corrupt(msg) => write!(f, "Corrupt record: {}", msg),
            StoreError::Database(msg) => write!(f, "Record database error: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        StoreError::Database(err.to_string())
    }
}

// === LifecycleError ===

/// Errors raised while creating, toggling or deleting records.
#[derive(Debug)]
pub enum LifecycleError {
    /// The URL input contained no non-empty line.
    NoUrls,
    /// The tag was empty after trimming.
    EmptyTag,
    /// Records can only be saved while a section is active.
    NoActiveSection,
    /// The underlying store failed.
    Store(StoreError),
}

impl fmt::Display for LifecycleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LifecycleError::NoUrls => write!(f, "Please enter at least one URL"),
            LifecycleError::EmptyTag => write!(f, "Please enter a tag"),
            LifecycleError::NoActiveSection => {
                write!(f, "Select a section before saving URLs")
            }
            LifecycleError::Store(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for LifecycleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LifecycleError::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for LifecycleError {
    fn from(err: StoreError) -> Self {
        LifecycleError::Store(err)
    }
}

// === NavigationError ===

/// Errors related to section navigation.
#[derive(Debug)]
pub enum NavigationError {
    /// The navigation id names no known section.
    UnknownSection(String),
    /// The newly selected section could not be loaded.
    Store(StoreError),
}

impl fmt::Display for NavigationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavigationError::UnknownSection(id) => write!(f, "Unknown section: {}", id),
            NavigationError::Store(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for NavigationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            NavigationError::Store(err) => Some(err),
            NavigationError::UnknownSection(_) => None,
        }
    }
}

impl From<StoreError> for NavigationError {
    fn from(err: StoreError) -> Self {
        NavigationError::Store(err)
    }
}

// === ExportError ===

/// Errors related to exporting records.
#[derive(Debug)]
pub enum ExportError {
    /// Records could not be read from the store.
    Store(StoreError),
    /// Failed to serialize records to JSON.
    SerializationError(String),
    /// Failed to write the export file.
    IoError(String),
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::Store(err) => write!(f, "Export failed: {}", err),
            ExportError::SerializationError(msg) => {
                write!(f, "Export serialization error: {}", msg)
            }
            ExportError::IoError(msg) => write!(f, "Export I/O error: {}", msg),
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExportError::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for ExportError {
    fn from(err: StoreError) -> Self {
        ExportError::Store(err)
    }
}

// === SettingsError ===

/// Errors related to settings management.
#[derive(Debug)]
pub enum SettingsError {
    /// An I/O error occurred while reading or writing settings.
    IoError(String),
    /// Failed to serialize or deserialize settings.
    SerializationError(String),
    /// The provided settings key is invalid.
    InvalidKey(String),
    /// The provided settings value is invalid.
    InvalidValue(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::IoError(msg) => write!(f, "Settings I/O error: {}", msg),
            SettingsError::SerializationError(msg) => {
                write!(f, "Settings serialization error: {}", msg)
            }
            SettingsError::InvalidKey(key) => write!(f, "Invalid settings key: {}", key),
            SettingsError::InvalidValue(msg) => {
                write!(f, "Invalid settings value: {}", msg)
            }
        }
    }
}

impl std::error::Error for SettingsError {}

// === ShortcutError ===

/// Errors related to keyboard shortcut management.
#[derive(Debug)]
pub enum ShortcutError {
    /// The shortcut keys conflict with an existing binding.
    Conflict(String),
    /// The provided key combination is invalid.
    InvalidKeys(String),
}

impl fmt::Display for ShortcutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShortcutError::Conflict(msg) => write!(f, "Shortcut conflict: {}", msg),
            ShortcutError::InvalidKeys(keys) => write!(f, "Invalid shortcut keys: {}", keys),
        }
    }
}

impl std::error::Error for ShortcutError {}
