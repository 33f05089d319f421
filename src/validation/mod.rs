//! Form validation for the console's create/edit forms.
//!
//! Each form holds raw text input the way an edit form does, and
//! `validate` either converts it into the request payload or returns every
//! failing field at once.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::api::types::{
    CreateOwner, CreateProperty, CreateUser, LoginRequest, UpdateOwner, UpdateProperty, UpdateUser,
};

const MIN_PASSWORD_LEN: usize = 6;

/// Field-keyed validation messages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    fields: BTreeMap<&'static str, String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message for a field. The first message for a field wins.
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.fields.entry(field).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.fields.iter().map(|(k, v)| (*k, v.as_str()))
    }

    fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, ValidationErrors> {
        if self.is_empty() {
            Ok(value())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in &self.fields {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

impl From<ValidationErrors> for crate::error::ConsoleError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}

fn login_email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\S+@\S+\.\S+").expect("valid email pattern"))
}

fn strict_email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"))
}

fn require(errors: &mut ValidationErrors, field: &'static str, value: &str, label: &str) -> bool {
    if value.trim().is_empty() {
        errors.add(field, format!("{label} is required"));
        false
    } else {
        true
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Login form.
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn validate(&self) -> Result<LoginRequest, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if self.email.is_empty() {
            errors.add("email", "Email is required");
        } else if !login_email_pattern().is_match(&self.email) {
            errors.add("email", "Please enter a valid email");
        }

        if self.password.is_empty() {
            errors.add("password", "Password is required");
        } else if self.password.chars().count() < MIN_PASSWORD_LEN {
            errors.add("password", "Password must be at least 6 characters");
        }

        errors.into_result(|| LoginRequest {
            email: self.email.clone(),
            password: self.password.clone(),
        })
    }
}

/// Owner create/edit form.
#[derive(Debug, Clone, Default)]
pub struct OwnerForm {
    pub name: String,
    pub address: String,
    pub phone: String,
    /// `YYYY-MM-DD`.
    pub birthday: String,
}

impl OwnerForm {
    fn check(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        require(&mut errors, "name", &self.name, "Name");
        require(&mut errors, "address", &self.address, "Address");
        require(&mut errors, "birthday", &self.birthday, "Birthday");
        errors
    }

    pub fn validate_create(&self) -> Result<CreateOwner, ValidationErrors> {
        self.check().into_result(|| CreateOwner {
            name: self.name.trim().to_string(),
            address: self.address.trim().to_string(),
            phone: non_empty(&self.phone),
            birthday: self.birthday.trim().to_string(),
        })
    }

    pub fn validate_update(&self) -> Result<UpdateOwner, ValidationErrors> {
        self.check().into_result(|| UpdateOwner {
            name: non_empty(&self.name),
            address: non_empty(&self.address),
            phone: non_empty(&self.phone),
            birthday: non_empty(&self.birthday),
        })
    }
}

/// Property create/edit form. Price is kept as entered.
#[derive(Debug, Clone, Default)]
pub struct PropertyForm {
    pub name: String,
    pub address: String,
    pub price: String,
    pub image: String,
    pub id_owner: String,
}

impl PropertyForm {
    fn check(&self) -> (ValidationErrors, f64) {
        let mut errors = ValidationErrors::new();
        require(&mut errors, "name", &self.name, "Name");
        require(&mut errors, "address", &self.address, "Address");

        let mut price = 0.0;
        if require(&mut errors, "price", &self.price, "Price") {
            match self.price.trim().parse::<f64>() {
                Ok(value) if value.is_finite() && value > 0.0 => price = value,
                _ => errors.add("price", "Please enter a valid price"),
            }
        }

        if self.id_owner.is_empty() {
            errors.add("idOwner", "Owner is required");
        }
        (errors, price)
    }

    pub fn validate_create(&self) -> Result<CreateProperty, ValidationErrors> {
        let (errors, price) = self.check();
        errors.into_result(|| CreateProperty {
            name: self.name.trim().to_string(),
            address: self.address.trim().to_string(),
            price,
            image: non_empty(&self.image),
            id_owner: self.id_owner.clone(),
        })
    }

    pub fn validate_update(&self) -> Result<UpdateProperty, ValidationErrors> {
        let (errors, price) = self.check();
        errors.into_result(|| UpdateProperty {
            name: non_empty(&self.name),
            address: non_empty(&self.address),
            price: Some(price),
            image: non_empty(&self.image),
            id_owner: non_empty(&self.id_owner),
        })
    }
}

/// User create/edit form. The password is only checked on create.
#[derive(Debug, Clone, Default)]
pub struct UserForm {
    pub name: String,
    pub address: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub birthday: String,
}

impl UserForm {
    fn check(&self, is_edit: bool) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        require(&mut errors, "name", &self.name, "Name");
        require(&mut errors, "address", &self.address, "Address");

        if require(&mut errors, "email", &self.email, "Email")
            && !strict_email_pattern().is_match(self.email.trim())
        {
            errors.add("email", "Please enter a valid email");
        }

        if !is_edit {
            if self.password.trim().is_empty() {
                errors.add("password", "Password is required");
            } else if self.password.chars().count() < MIN_PASSWORD_LEN {
                errors.add("password", "Password must be at least 6 characters");
            }
        }

        if require(&mut errors, "birthday", &self.birthday, "Birthday")
            && NaiveDate::parse_from_str(self.birthday.trim(), "%Y-%m-%d").is_err()
        {
            errors.add("birthday", "Please enter a valid date");
        }
        errors
    }

    pub fn validate_create(&self) -> Result<CreateUser, ValidationErrors> {
        self.check(false).into_result(|| CreateUser {
            name: self.name.trim().to_string(),
            address: self.address.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: non_empty(&self.phone),
            password: self.password.clone(),
            birthday: self.birthday.trim().to_string(),
        })
    }

    pub fn validate_update(&self) -> Result<UpdateUser, ValidationErrors> {
        self.check(true).into_result(|| UpdateUser {
            name: non_empty(&self.name),
            address: non_empty(&self.address),
            email: non_empty(&self.email),
            phone: non_empty(&self.phone),
            birthday: non_empty(&self.birthday),
        })
    }
}
