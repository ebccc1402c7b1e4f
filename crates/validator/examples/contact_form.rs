//! Contact form validation.
//!
//! Run with: `cargo run --example contact_form`
//!
//! Set `RUST_LOG=formgate_validator=trace` to watch the pipeline.

use formgate_validator::prelude::*;
use tracing_subscriber::EnvFilter;

fn contact_form() -> Result<Validator, RegistrationError> {
    Validator::new(Record::new())
        .pre_filter("*", "trim")?
        .rules("name", ["required", "length[2,60]"])?
        .rules("email", ["required", "email"])?
        .rules("phone", ["phone"])?
        .rules("message", ["required", "standard_text"])?
        .callback("website", "honeypot")?
        .post_filter("name", "ucfirst")
}

fn messages() -> MessageTable {
    MessageTable::new()
        .with("name", "required", "Please tell us your name.")
        .with("name", "length", "Your name should be 2 to 60 characters.")
        .with("email", "required", "We need an email address to reply.")
        .with("email", "email", "That email address does not look right.")
        .with("phone", "phone", "Phone numbers need 7, 10 or 11 digits.")
        .with("message", "required", "Please write a message.")
        .with("message", "standard_text", "Please use plain text only.")
        .with("website", "invalid", "Submission rejected.")
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let form = contact_form()?;
    let table = messages();

    println!("=== Contact form ===\n");

    let submissions = [
        serde_json::json!({
            "name": "  ann  ",
            "email": "ann@example.com",
            "phone": "(555) 123-4567",
            "message": "Hello, I'd like a quote.",
            "website": ""
        }),
        serde_json::json!({
            "name": "",
            "email": "bad",
            "phone": "555",
            "message": "<b>hi</b>",
            "website": "http://spam.example"
        }),
    ];

    for submission in submissions {
        let mut validator = form.copy(Record::from_json(submission)?);
        if validator.validate() {
            println!("accepted: {}", serde_json::to_string(validator.record())?);
        } else {
            println!("rejected:");
            for (field, message) in validator.messages(&table)? {
                println!("  {field}: {message}");
            }
        }
        println!();
    }

    Ok(())
}
