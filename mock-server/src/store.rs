//! In-memory users and cost items.

use std::collections::HashMap;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{json, Map, Value};
use uuid::Uuid;

use crate::error::{AppError, AppResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Food,
    Health,
    Housing,
    Sport,
    Education,
}

impl Category {
    /// Report order.
    pub const ALL: [Category; 5] = [
        Category::Food,
        Category::Health,
        Category::Housing,
        Category::Sport,
        Category::Education,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Food => "food",
            Category::Health => "health",
            Category::Housing => "housing",
            Category::Sport => "sport",
            Category::Education => "education",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == s)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaritalStatus {
    Single,
    Married,
    Divorced,
    Widowed,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub birthday: NaiveDate,
    pub marital_status: MaritalStatus,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Cost {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub description: String,
    pub category: Category,
    pub userid: String,
    #[serde(serialize_with = "serialize_amount")]
    pub sum: f64,
    pub date: DateTime<Utc>,
}

/// JSON number for an amount; whole values carry no fractional part.
pub fn amount(value: f64) -> Value {
    if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        Value::from(value as i64)
    } else {
        Value::from(value)
    }
}

fn serialize_amount<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    amount(*value).serialize(serializer)
}

fn seeded_birthday() -> NaiveDate {
    NaiveDate::from_ymd_opt(1990, 1, 1).expect("1990-01-01 is a calendar date")
}

#[derive(Debug, Default)]
pub struct Store {
    users: HashMap<String, User>,
    costs: Vec<Cost>,
}

impl Store {
    /// Store holding the user the smoke suites post costs for.
    pub fn seeded() -> Self {
        let mut store = Store::default();
        store.users.insert(
            "123123".to_string(),
            User {
                id: "123123".to_string(),
                first_name: "mosh".to_string(),
                last_name: "israeli".to_string(),
                birthday: seeded_birthday(),
                marital_status: MaritalStatus::Single,
            },
        );
        store
    }

    pub fn add_user(&mut self, user: User) -> AppResult<User> {
        if self.users.contains_key(&user.id) {
            return Err(AppError::DuplicateUser);
        }
        self.users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    pub fn user(&self, id: &str) -> Option<&User> {
        self.users.get(id)
    }

    /// Sum of every cost the user ever added.
    pub fn total_for(&self, userid: &str) -> f64 {
        self.costs
            .iter()
            .filter(|c| c.userid == userid)
            .map(|c| c.sum)
            .sum()
    }

    pub fn add_cost(&mut self, cost: Cost) -> AppResult<Cost> {
        if !self.users.contains_key(&cost.userid) {
            return Err(AppError::UserNotFound);
        }
        self.costs.push(cost.clone());
        Ok(cost)
    }

    /// Costs of `userid` dated within the given calendar month, grouped by
    /// category in [`Category::ALL`] order.
    pub fn monthly_report(&self, userid: &str, year: i32, month: u32) -> AppResult<Value> {
        let costs: Vec<&Cost> = self
            .costs
            .iter()
            .filter(|c| c.userid == userid && c.date.year() == year && c.date.month() == month)
            .collect();
        if costs.is_empty() {
            return Err(AppError::NoData);
        }

        let grouped: Vec<Value> = Category::ALL
            .into_iter()
            .map(|category| {
                let items: Vec<Value> = costs
                    .iter()
                    .filter(|c| c.category == category)
                    .map(|c| {
                        json!({
                            "sum": amount(c.sum),
                            "description": c.description,
                            "day": c.date.day(),
                        })
                    })
                    .collect();
                let mut entry = Map::new();
                entry.insert(category.as_str().to_string(), Value::Array(items));
                Value::Object(entry)
            })
            .collect();

        Ok(json!({
            "userid": userid,
            "year": year,
            "month": month,
            "costs": grouped,
        }))
    }
}
