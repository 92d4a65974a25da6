// PreferencesStore: typed accessors over the flat key-value layer

use crate::kv::{KvBackend, RawValue};
use crate::options::{
    DateFormat, IndicatorFrame, IndicatorSymbol, QuickAddButtonStyle, ThemeAccent, ThemeBackground,
};
use tracing::{debug, warn};

/// A value storable as a preference: convertible to and from a [`RawValue`].
///
/// `from_raw` returns `None` for a type-mismatched or unparseable raw value;
/// the store resolves that to the key's default.
pub trait PreferenceValue: Copy {
    fn to_raw(self) -> RawValue;
    fn from_raw(raw: &RawValue) -> Option<Self>;
}

impl PreferenceValue for bool {
    fn to_raw(self) -> RawValue {
        RawValue::Bool(self)
    }

    fn from_raw(raw: &RawValue) -> Option<Self> {
        raw.as_bool()
    }
}

// Option enums store their lowercase raw string, UserDefaults-style.
macro_rules! option_preference {
    ($($ty:ty),+ $(,)?) => {
        $(impl PreferenceValue for $ty {
            fn to_raw(self) -> RawValue {
                RawValue::Text(self.as_str().to_string())
            }

            fn from_raw(raw: &RawValue) -> Option<Self> {
                raw.as_text().and_then(Self::parse)
            }
        })+
    };
}

option_preference!(
    ThemeBackground,
    ThemeAccent,
    IndicatorFrame,
    IndicatorSymbol,
    QuickAddButtonStyle,
    DateFormat,
);

/// A typed preference key: storage name plus declared default.
#[derive(Debug, Clone, Copy)]
pub struct Key<T: PreferenceValue> {
    pub name: &'static str,
    pub default: T,
}

/// The full preference schema. Key strings match the original app's
/// UserDefaults keys, so a shared container written by either app variant
/// reads back identically.
pub mod keys {
    use super::*;

    // Appearance
    pub const THEME_BACKGROUND: Key<ThemeBackground> = Key {
        name: "ThemeBackground",
        default: ThemeBackground::System,
    };
    pub const THEME_ACCENT: Key<ThemeAccent> = Key {
        name: "ThemeAccent",
        default: ThemeAccent::Purple,
    };
    pub const INDICATOR_FRAME: Key<IndicatorFrame> = Key {
        name: "IndicatorFrame",
        default: IndicatorFrame::Roundsquare,
    };
    pub const INDICATOR_SYMBOL: Key<IndicatorSymbol> = Key {
        name: "IndicatorChecked",
        default: IndicatorSymbol::Checkmark,
    };
    pub const INDICATOR_FILL: Key<bool> = Key {
        name: "IndicatorFill",
        default: false,
    };
    pub const QUICK_ADD_BUTTON_STYLE: Key<QuickAddButtonStyle> = Key {
        name: "QuickAddButtonStyle",
        default: QuickAddButtonStyle::Small,
    };
    pub const DATE_FORMAT: Key<DateFormat> = Key {
        name: "DateFormat",
        default: DateFormat::International,
    };

    // App behavior
    pub const DEBUG_ENABLED: Key<bool> = Key {
        name: "DebugEnabled",
        default: false,
    };
    pub const USE_HAPTICS: Key<bool> = Key {
        name: "UseHaptics",
        default: true,
    };
    pub const OPEN_SETTINGS_ON_EDGE_SLIDE: Key<bool> = Key {
        name: "OpenSettingsOnLeftEdgeSlide",
        default: true,
    };
    pub const AUTO_FOCUS_TEXT_FIELDS: Key<bool> = Key {
        name: "AutoFocusTextFields",
        default: true,
    };

    // List behavior
    pub const ALPHABETIZE_LIST: Key<bool> = Key {
        name: "AlphabetizeList",
        default: true,
    };
    pub const AUTO_DELETE_ON_CHECKOFF: Key<bool> = Key {
        name: "AutoDeleteTaskOnCheckoff",
        default: false,
    };
}

/// Every key's name and raw default, for registration at construction.
fn raw_defaults() -> Vec<(&'static str, RawValue)> {
    fn entry<T: PreferenceValue>(key: &Key<T>) -> (&'static str, RawValue) {
        (key.name, key.default.to_raw())
    }

    vec![
        entry(&keys::THEME_BACKGROUND),
        entry(&keys::THEME_ACCENT),
        entry(&keys::INDICATOR_FRAME),
        entry(&keys::INDICATOR_SYMBOL),
        entry(&keys::INDICATOR_FILL),
        entry(&keys::QUICK_ADD_BUTTON_STYLE),
        entry(&keys::DATE_FORMAT),
        entry(&keys::DEBUG_ENABLED),
        entry(&keys::USE_HAPTICS),
        entry(&keys::OPEN_SETTINGS_ON_EDGE_SLIDE),
        entry(&keys::AUTO_FOCUS_TEXT_FIELDS),
        entry(&keys::ALPHABETIZE_LIST),
        entry(&keys::AUTO_DELETE_ON_CHECKOFF),
    ]
}

/// Handle for removing a listener registered with
/// [`PreferencesStore::on_change`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerId(u64);

type Listener = Box<dyn Fn(&str)>;

/// Typed user preferences over an injected [`KvBackend`].
///
/// Every key always resolves to a valid value: the stored one when present
/// and decodable, the declared default otherwise. Construction registers
/// defaults for absent keys without overwriting stored values and without
/// notifying. `set` notifies every listener with the key name on every write,
/// whether or not the value changed.
pub struct PreferencesStore {
    kv: Box<dyn KvBackend>,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener: u64,
}

impl PreferencesStore {
    /// Open the preferences over the given key-value layer, registering
    /// defaults for any key not already stored.
    pub fn open(kv: impl KvBackend + 'static) -> Self {
        let mut kv: Box<dyn KvBackend> = Box::new(kv);

        for (name, default) in raw_defaults() {
            if let Err(e) = kv.register_default(name, default) {
                warn!(key = name, error = ?e, "Failed to register preference default");
            }
        }
        debug!("Opened preferences store");

        Self {
            kv,
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    /// Current value for a key: the stored value when present and decodable,
    /// otherwise the key's default. Never fails.
    pub fn get<T: PreferenceValue>(&self, key: &Key<T>) -> T {
        self.kv
            .get(key.name)
            .and_then(|raw| T::from_raw(&raw))
            .unwrap_or(key.default)
    }

    /// Write a value for a key and notify every listener.
    ///
    /// A persistence failure in the underlying layer is logged and swallowed;
    /// listeners are notified regardless.
    pub fn set<T: PreferenceValue>(&mut self, key: &Key<T>, value: T) {
        if let Err(e) = self.kv.set(key.name, value.to_raw()) {
            warn!(key = key.name, error = ?e, "Failed to persist preference");
        }
        self.notify(key.name);
    }

    /// Register a listener invoked with the key name whenever any key is set.
    /// No ordering is guaranteed between listeners.
    pub fn on_change(&mut self, listener: impl Fn(&str) + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Drop a listener. Unknown ids are ignored.
    pub fn remove_listener(&mut self, id: ListenerId) {
        self.listeners.retain(|(existing, _)| *existing != id);
    }

    fn notify(&self, key: &str) {
        for (_, listener) in &self.listeners {
            listener(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryKv;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn store() -> PreferencesStore {
        PreferencesStore::open(MemoryKv::new())
    }

    #[test]
    fn test_every_key_resolves_to_its_default() {
        let prefs = store();
        assert_eq!(prefs.get(&keys::THEME_BACKGROUND), ThemeBackground::System);
        assert_eq!(prefs.get(&keys::THEME_ACCENT), ThemeAccent::Purple);
        assert_eq!(prefs.get(&keys::INDICATOR_FRAME), IndicatorFrame::Roundsquare);
        assert_eq!(prefs.get(&keys::INDICATOR_SYMBOL), IndicatorSymbol::Checkmark);
        assert!(!prefs.get(&keys::INDICATOR_FILL));
        assert_eq!(prefs.get(&keys::QUICK_ADD_BUTTON_STYLE), QuickAddButtonStyle::Small);
        assert_eq!(prefs.get(&keys::DATE_FORMAT), DateFormat::International);
        assert!(!prefs.get(&keys::DEBUG_ENABLED));
        assert!(prefs.get(&keys::USE_HAPTICS));
        assert!(prefs.get(&keys::OPEN_SETTINGS_ON_EDGE_SLIDE));
        assert!(prefs.get(&keys::AUTO_FOCUS_TEXT_FIELDS));
        assert!(prefs.get(&keys::ALPHABETIZE_LIST));
        assert!(!prefs.get(&keys::AUTO_DELETE_ON_CHECKOFF));
    }

    #[test]
    fn test_set_then_get_round_trips_every_key() {
        let mut prefs = store();

        prefs.set(&keys::THEME_BACKGROUND, ThemeBackground::Dark);
        prefs.set(&keys::THEME_ACCENT, ThemeAccent::Blue);
        prefs.set(&keys::INDICATOR_FRAME, IndicatorFrame::Diamond);
        prefs.set(&keys::INDICATOR_SYMBOL, IndicatorSymbol::Xmark);
        prefs.set(&keys::INDICATOR_FILL, true);
        prefs.set(&keys::QUICK_ADD_BUTTON_STYLE, QuickAddButtonStyle::Material);
        prefs.set(&keys::DATE_FORMAT, DateFormat::American);
        prefs.set(&keys::DEBUG_ENABLED, true);
        prefs.set(&keys::USE_HAPTICS, false);
        prefs.set(&keys::OPEN_SETTINGS_ON_EDGE_SLIDE, false);
        prefs.set(&keys::AUTO_FOCUS_TEXT_FIELDS, false);
        prefs.set(&keys::ALPHABETIZE_LIST, false);
        prefs.set(&keys::AUTO_DELETE_ON_CHECKOFF, true);

        assert_eq!(prefs.get(&keys::THEME_BACKGROUND), ThemeBackground::Dark);
        assert_eq!(prefs.get(&keys::THEME_ACCENT), ThemeAccent::Blue);
        assert_eq!(prefs.get(&keys::INDICATOR_FRAME), IndicatorFrame::Diamond);
        assert_eq!(prefs.get(&keys::INDICATOR_SYMBOL), IndicatorSymbol::Xmark);
        assert!(prefs.get(&keys::INDICATOR_FILL));
        assert_eq!(prefs.get(&keys::QUICK_ADD_BUTTON_STYLE), QuickAddButtonStyle::Material);
        assert_eq!(prefs.get(&keys::DATE_FORMAT), DateFormat::American);
        assert!(prefs.get(&keys::DEBUG_ENABLED));
        assert!(!prefs.get(&keys::USE_HAPTICS));
        assert!(!prefs.get(&keys::OPEN_SETTINGS_ON_EDGE_SLIDE));
        assert!(!prefs.get(&keys::AUTO_FOCUS_TEXT_FIELDS));
        assert!(!prefs.get(&keys::ALPHABETIZE_LIST));
        assert!(prefs.get(&keys::AUTO_DELETE_ON_CHECKOFF));
    }

    #[test]
    fn test_defaults_never_overwrite_stored_values() {
        let mut kv = MemoryKv::new();
        kv.set("UseHaptics", RawValue::Bool(false)).unwrap();
        kv.set("ThemeAccent", RawValue::Text("blue".to_string())).unwrap();

        let prefs = PreferencesStore::open(kv);
        assert!(!prefs.get(&keys::USE_HAPTICS));
        assert_eq!(prefs.get(&keys::THEME_ACCENT), ThemeAccent::Blue);
    }

    #[test]
    fn test_unparseable_stored_value_falls_back_to_default() {
        let mut kv = MemoryKv::new();
        // Unknown enum string
        kv.set("ThemeBackground", RawValue::Text("sepia".to_string())).unwrap();
        // Type mismatch: bool where a string is expected, and vice versa
        kv.set("IndicatorFrame", RawValue::Bool(true)).unwrap();
        kv.set("UseHaptics", RawValue::Text("yes".to_string())).unwrap();

        let prefs = PreferencesStore::open(kv);
        assert_eq!(prefs.get(&keys::THEME_BACKGROUND), ThemeBackground::System);
        assert_eq!(prefs.get(&keys::INDICATOR_FRAME), IndicatorFrame::Roundsquare);
        assert!(prefs.get(&keys::USE_HAPTICS));
    }

    #[test]
    fn test_set_notifies_listeners_with_key_name() {
        let mut prefs = store();
        let seen: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);

        prefs.on_change(move |key| sink.borrow_mut().push(key.to_string()));

        prefs.set(&keys::DEBUG_ENABLED, true);
        prefs.set(&keys::THEME_ACCENT, ThemeAccent::Blue);
        // Same value again still notifies
        prefs.set(&keys::THEME_ACCENT, ThemeAccent::Blue);

        assert_eq!(
            *seen.borrow(),
            vec!["DebugEnabled", "ThemeAccent", "ThemeAccent"]
        );
    }

    #[test]
    fn test_removed_listener_is_not_invoked() {
        let mut prefs = store();
        let count = Rc::new(RefCell::new(0usize));
        let sink = Rc::clone(&count);

        let id = prefs.on_change(move |_| *sink.borrow_mut() += 1);
        prefs.set(&keys::DEBUG_ENABLED, true);
        prefs.remove_listener(id);
        prefs.set(&keys::DEBUG_ENABLED, false);

        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn test_construction_does_not_notify() {
        // Listeners can only be registered after construction, so default
        // registration is silent by shape; this pins the write-through count.
        let mut prefs = store();
        let count = Rc::new(RefCell::new(0usize));
        let sink = Rc::clone(&count);
        prefs.on_change(move |_| *sink.borrow_mut() += 1);
        assert_eq!(*count.borrow(), 0);
    }
}
