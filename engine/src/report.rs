//! Structured reporting of experiment runs.
//!
//! Key/value pairs reported while a run executes are collected in a
//! thread-local reporter and printed as a single JSON object when the
//! guard returned by `enable_reporting` drops. Collections group the
//! per-query records of a batch. When reporting was never enabled all
//! of this is a no-op, so library code may report unconditionally.

use serde_json::{Map, Value};
use std::{cell::RefCell, mem::swap};

pub use serde_json::json;

#[derive(Debug)]
enum Context {
    Object(Map<String, Value>),
    Collection(Vec<Value>),
}

#[derive(Debug)]
enum StackItem {
    Key(String),
    Object(Map<String, Value>),
    Collection(Vec<Value>),
}

#[derive(Debug)]
struct Reporter {
    current: Context,
    stack: Vec<StackItem>,
}

impl Default for Reporter {
    fn default() -> Self {
        Reporter {
            current: Context::Object(Map::new()),
            stack: Vec::new(),
        }
    }
}

impl Reporter {
    fn report(&mut self, key: String, value: Value) {
        match &mut self.current {
            Context::Object(object) => {
                object.insert(key, value);
            }
            Context::Collection(_) => panic!("cannot report a value directly on a collection"),
        }
    }

    fn create_collection_under_key(&mut self, key: String) {
        match &mut self.current {
            Context::Object(object) => {
                let mut parent = Map::new();
                swap(&mut parent, object);
                self.stack.push(StackItem::Object(parent));
                self.stack.push(StackItem::Key(key));
                self.current = Context::Collection(Vec::new());
            }
            Context::Collection(_) => panic!("cannot nest a keyed collection in a collection"),
        }
    }

    fn create_collection_item(&mut self) {
        match &mut self.current {
            Context::Collection(collection) => {
                let mut parent = Vec::new();
                swap(&mut parent, collection);
                self.stack.push(StackItem::Collection(parent));
                self.current = Context::Object(Map::new());
            }
            Context::Object(_) => panic!("cannot create a collection item in an object"),
        }
    }

    fn pop_context(&mut self) {
        match self.stack.pop().expect("tried to pop from empty reporting context") {
            StackItem::Key(key) => {
                let Some(StackItem::Object(mut parent)) = self.stack.pop() else {
                    panic!("inconsistent reporting context");
                };
                let mut finished = Context::Object(Map::new());
                swap(&mut self.current, &mut finished);
                let value = match finished {
                    Context::Object(object) => Value::Object(object),
                    Context::Collection(collection) => Value::Array(collection),
                };
                parent.insert(key, value);
                self.current = Context::Object(parent);
            }
            StackItem::Collection(mut collection) => {
                let mut finished = Context::Object(Map::new());
                swap(&mut self.current, &mut finished);
                match finished {
                    Context::Object(object) => collection.push(Value::Object(object)),
                    Context::Collection(_) => panic!("inconsistent reporting context"),
                }
                self.current = Context::Collection(collection);
            }
            StackItem::Object(_) => panic!("inconsistent reporting context"),
        }
    }
}

thread_local! {
    static REPORTER: RefCell<Option<Reporter>> = const { RefCell::new(None) };
}

pub fn report(key: String, value: Value) {
    REPORTER.with(|reporter| {
        if let Some(reporter) = reporter.borrow_mut().as_mut() {
            reporter.report(key, value);
        }
    });
}

#[macro_export]
macro_rules! report {
    ($k:expr, $($json:tt)+) => {
        $crate::report::report($k.to_string(), $crate::report::json!($($json)+))
    };
}

/// Opens a collection under the given key; items are added through
/// `push_collection_item`. The collection closes when the guard drops.
#[must_use]
pub struct CollectionContextGuard(());

pub fn push_collection_context(key: &str) -> CollectionContextGuard {
    REPORTER.with(|reporter| {
        if let Some(reporter) = reporter.borrow_mut().as_mut() {
            reporter.create_collection_under_key(key.to_string());
        }
    });
    CollectionContextGuard(())
}

impl Drop for CollectionContextGuard {
    fn drop(&mut self) {
        REPORTER.with(|reporter| {
            if let Some(reporter) = reporter.borrow_mut().as_mut() {
                reporter.pop_context();
            }
        });
    }
}

impl CollectionContextGuard {
    pub fn push_collection_item(&mut self) -> CollectionItemContextGuard {
        REPORTER.with(|reporter| {
            if let Some(reporter) = reporter.borrow_mut().as_mut() {
                reporter.create_collection_item();
            }
        });
        CollectionItemContextGuard(self)
    }
}

/// One object in the enclosing collection; reported values land in it until
/// the guard drops.
#[must_use]
pub struct CollectionItemContextGuard<'a>(&'a CollectionContextGuard);

impl Drop for CollectionItemContextGuard<'_> {
    fn drop(&mut self) {
        REPORTER.with(|reporter| {
            if let Some(reporter) = reporter.borrow_mut().as_mut() {
                reporter.pop_context();
            }
        });
    }
}

/// Prints the collected report as one JSON object to stdout on drop.
#[must_use]
pub struct ReportingGuard(());

impl Drop for ReportingGuard {
    fn drop(&mut self) {
        REPORTER.with(|reporter| {
            if let Some(reporter) = reporter.borrow_mut().take() {
                assert!(reporter.stack.is_empty(), "unclosed reporting contexts at exit");
                match reporter.current {
                    Context::Object(object) => println!("{}", Value::Object(object)),
                    Context::Collection(_) => panic!("broken root object for reporting"),
                }
            }
        });
    }
}

pub fn enable_reporting(program: &str) -> ReportingGuard {
    REPORTER.with(|reporter| reporter.replace(Some(Reporter::default())));

    report!("program", program);
    report!("start_time", format!("{}", time::now_utc().rfc822()));
    report!("args", std::env::args().collect::<Vec<String>>());

    ReportingGuard(())
}

pub mod benchmark;
pub use benchmark::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collections_nest_and_close() {
        let mut reporter = Reporter::default();
        reporter.report("graph".to_string(), json!({ "num_nodes": 3 }));
        reporter.create_collection_under_key("algo_runs".to_string());
        for run in 0..2 {
            reporter.create_collection_item();
            reporter.report("run".to_string(), json!(run));
            reporter.pop_context();
        }
        reporter.pop_context();

        assert!(reporter.stack.is_empty());
        let Context::Object(object) = reporter.current else { panic!() };
        assert_eq!(
            Value::Object(object),
            json!({ "graph": { "num_nodes": 3 }, "algo_runs": [{ "run": 0 }, { "run": 1 }] })
        );
    }
}
