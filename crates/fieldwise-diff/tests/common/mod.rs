//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::cell::OnceCell;
use std::rc::Rc;

use chrono::NaiveDateTime;
use fieldwise_types::{
    inspect_enum, inspect_record, Collection, Inspect, Kind, Lineage, Order, Shape,
};

pub struct Address {
    pub number: i32,
}

impl Default for Address {
    fn default() -> Self {
        Self { number: 1 }
    }
}

#[derive(Default)]
pub struct Home {
    pub address: Address,
}

#[derive(Default)]
pub struct Person {
    pub date_of_birth: Option<Box<dyn Inspect>>,
    pub name: Option<String>,
    pub home: Home,
    pub neighbour: Option<Box<Person>>,
}

/// Same fields as [`Person`], different type.
#[derive(Default)]
pub struct Human {
    pub date_of_birth: Option<Box<dyn Inspect>>,
    pub name: Option<String>,
    pub home: Home,
    pub neighbour: Option<Box<Person>>,
}

pub struct Giant {
    pub date_of_birth: Option<Box<dyn Inspect>>,
    pub name: Option<String>,
    pub home: Home,
    pub neighbour: Option<Box<Person>>,
    pub height: f64,
}

impl Default for Giant {
    fn default() -> Self {
        Self {
            date_of_birth: None,
            name: None,
            home: Home::default(),
            neighbour: None,
            height: 3.0,
        }
    }
}

/// Claims every instance is equal; the engine must not care.
#[derive(Default)]
pub struct EqualPerson {
    pub name: Option<String>,
    pub home: Home,
}

impl PartialEq for EqualPerson {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

/// A person whose links are tied after construction, so graphs may cycle.
#[derive(Default)]
pub struct FriendlyPerson {
    pub name: Option<String>,
    pub home: Home,
    pub neighbour: OnceCell<Rc<FriendlyPerson>>,
    pub friends: OnceCell<Vec<Rc<FriendlyPerson>>>,
}

#[derive(Clone, Copy, Debug)]
pub enum Health {
    Fine,
    Poorly,
}

pub struct Patient {
    pub date_of_birth: Option<Rc<NaiveDateTime>>,
    pub health: Option<Health>,
}

pub struct WithCollection {
    pub collection: Box<dyn Inspect>,
}

pub struct WithMap {
    pub map: Box<dyn Inspect>,
}

pub struct Grid {
    pub cells: [[i32; 2]; 2],
}

inspect_record!(Address { number });
inspect_record!(Home { address });
inspect_record!(Person { date_of_birth, name, home, neighbour });
inspect_record!(Human: ["Person"] { date_of_birth, name, home, neighbour });
inspect_record!(Giant: ["Person"] { date_of_birth, name, home, neighbour, height });
inspect_record!(EqualPerson: ["Person"] { name, home });
inspect_record!(FriendlyPerson: ["Person"] { name, home, neighbour, friends });
inspect_record!(Patient { date_of_birth, health });
inspect_record!(WithCollection { collection });
inspect_record!(WithMap { map });
inspect_record!(Grid { cells });
inspect_enum!(Health { Fine, Poorly });

/// A set that remembers insertion order, standing in for linked hash sets.
pub struct InsertionSet<T>(pub Vec<T>);

impl<T: PartialEq> InsertionSet<T> {
    pub fn of(items: impl IntoIterator<Item = T>) -> Self {
        let mut set = Vec::new();
        for item in items {
            if !set.contains(&item) {
                set.push(item);
            }
        }
        Self(set)
    }
}

impl<T: Inspect> Inspect for InsertionSet<T> {
    fn shape(&self) -> Shape<'_> {
        Shape::Set(Collection::of(
            Kind::new("InsertionSet", Order::Insertion),
            &self.0,
        ))
    }

    fn lineage(&self) -> Lineage {
        Lineage::new("InsertionSet", &["set"])
    }
}

pub fn person(name: &str) -> Person {
    Person {
        name: Some(name.to_string()),
        ..Default::default()
    }
}

pub fn friendly(name: &str, number: i32) -> Rc<FriendlyPerson> {
    Rc::new(FriendlyPerson {
        name: Some(name.to_string()),
        home: Home {
            address: Address { number },
        },
        ..Default::default()
    })
}

pub fn instant(millis: i64) -> NaiveDateTime {
    fieldwise_types::temporal::instant_from_millis(millis)
        .expect("in range")
        .naive_utc()
}
