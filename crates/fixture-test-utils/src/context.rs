//! Deterministic specimen contexts

use fixture_kernel::{Resolution, SpecimenContext, SpecimenRequest};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::any::Any;
use uuid::Uuid;

/// Configuration for [`SequentialContext`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextConfig {
    /// First number handed out
    pub first_number: i64,
    /// Increment between numbers
    pub step: i64,
    /// Prefix generated strings with the request hint
    pub hint_prefix: bool,
    /// Short type names answered with `NoSpecimen`
    pub unresolved_types: Vec<String>,
    /// Short type names answered with `Omit`
    pub omitted_types: Vec<String>,
}

impl ContextConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from JSON; missing keys take their defaults
    ///
    /// # Errors
    /// Returns the parser error for malformed input.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[must_use]
    pub fn with_first_number(mut self, first: i64) -> Self {
        self.first_number = first;
        self
    }

    #[must_use]
    pub fn with_step(mut self, step: i64) -> Self {
        self.step = step;
        self
    }

    #[must_use]
    pub fn without_hint_prefix(mut self) -> Self {
        self.hint_prefix = false;
        self
    }

    /// Answer requests for `type_name` with `NoSpecimen`
    #[must_use]
    pub fn declining(mut self, type_name: impl Into<String>) -> Self {
        self.unresolved_types.push(type_name.into());
        self
    }

    /// Answer requests for `type_name` with `Omit`
    #[must_use]
    pub fn omitting(mut self, type_name: impl Into<String>) -> Self {
        self.omitted_types.push(type_name.into());
        self
    }
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            first_number: 1,
            step: 1,
            hint_prefix: true,
            unresolved_types: Vec::new(),
            omitted_types: Vec::new(),
        }
    }
}

/// Anonymous values from a counter
///
/// Integers come from a shared sequence, strings are a hint followed by a
/// fresh UUID, booleans alternate. Anything else is `NoSpecimen`.
#[derive(Debug)]
pub struct SequentialContext {
    config: ContextConfig,
    next: Mutex<i64>,
}

impl SequentialContext {
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ContextConfig::default())
    }

    #[must_use]
    pub fn with_config(config: ContextConfig) -> Self {
        let next = Mutex::new(config.first_number);
        Self { config, next }
    }

    #[must_use]
    pub fn config(&self) -> &ContextConfig {
        &self.config
    }

    fn next_number(&self) -> i64 {
        let mut next = self.next.lock();
        let n = *next;
        *next = next.wrapping_add(self.config.step);
        n
    }

    fn integer<T: TryFrom<i64> + Any>(&self) -> Resolution {
        T::try_from(self.next_number()).map_or(Resolution::NoSpecimen, Resolution::specimen)
    }

    fn string(&self, hint: Option<&str>) -> String {
        match hint {
            Some(hint) if self.config.hint_prefix => format!("{hint}{}", Uuid::new_v4()),
            _ => Uuid::new_v4().to_string(),
        }
    }

    fn lists(list: &[String], short_name: &str) -> bool {
        list.iter().any(|t| t == short_name)
    }
}

impl Default for SequentialContext {
    fn default() -> Self {
        Self::new()
    }
}

impl SpecimenContext for SequentialContext {
    fn resolve(&self, request: &SpecimenRequest) -> Resolution {
        let short_name = request.requested().short_name();
        if Self::lists(&self.config.omitted_types, &short_name) {
            return Resolution::Omit;
        }
        if Self::lists(&self.config.unresolved_types, &short_name) {
            return Resolution::NoSpecimen;
        }

        if request.is::<String>() {
            Resolution::specimen(self.string(request.hint()))
        } else if request.is::<i64>() {
            self.integer::<i64>()
        } else if request.is::<i32>() {
            self.integer::<i32>()
        } else if request.is::<u64>() {
            self.integer::<u64>()
        } else if request.is::<u32>() {
            self.integer::<u32>()
        } else if request.is::<u8>() {
            self.integer::<u8>()
        } else if request.is::<usize>() {
            self.integer::<usize>()
        } else if request.is::<bool>() {
            Resolution::specimen(self.next_number() % 2 != 0)
        } else if request.is::<Uuid>() {
            Resolution::specimen(Uuid::new_v4())
        } else {
            Resolution::NoSpecimen
        }
    }
}

/// Wraps a context and records every request it sees
#[derive(Debug)]
pub struct RecordingContext<C> {
    inner: C,
    requests: Mutex<Vec<SpecimenRequest>>,
}

impl<C: SpecimenContext> RecordingContext<C> {
    #[must_use]
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Requests seen so far, in order
    #[must_use]
    pub fn requests(&self) -> Vec<SpecimenRequest> {
        self.requests.lock().clone()
    }

    /// Hints of the requests seen so far
    #[must_use]
    pub fn hints(&self) -> Vec<&'static str> {
        self.requests
            .lock()
            .iter()
            .filter_map(SpecimenRequest::hint)
            .collect()
    }

    #[must_use]
    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }
}

impl<C: SpecimenContext> SpecimenContext for RecordingContext<C> {
    fn resolve(&self, request: &SpecimenRequest) -> Resolution {
        self.requests.lock().push(*request);
        self.inner.resolve(request)
    }
}
