//! Simulates a user filling in a signup form.
//!
//! Run with: `cargo run -p formwork --example signup`

use formwork::prelude::*;
use formwork::BlurEvent;
use simplelog::{Config, LevelFilter, SimpleLogger};

const RULES: &str = r#"{
    "name": ["required", {"rule": "maxLength", "args": [40]}],
    "email": "email",
    "password": {"rule": "password", "args": [10]},
    "confirm": {"rule": "confirmPassword", "args": [{"field": "password"}]},
    "pin": "pinCode",
    "terms": "checkbox",
    "referrer": "refferer"
}"#;

fn print_form(form: &FormController, rules: &RuleSet) {
    for field in rules.fields() {
        let value = form.value(field).map(|v| v.to_string()).unwrap_or_default();
        let mark = if form.is_touched(field) { "*" } else { " " };
        match form.visible_error(field) {
            Some(error) => println!("  {mark} {field:<10} {value:<20} ! {error}"),
            None => println!("  {mark} {field:<10} {value}"),
        }
    }
    println!();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    SimpleLogger::init(LevelFilter::Debug, Config::default())?;

    let rules = RuleSet::from_json(RULES)?;
    for (field, problem) in rules.lint(&RuleCatalog::standard()) {
        println!("config warning: field '{field}': {problem}");
    }

    let mut form = FormController::new(Values::new()).with_config(FormConfig::new("signup"));

    println!("typing a name and a bad email:");
    form.on_change(ChangeEvent::text("name", "Ada Lovelace"), &rules);
    form.on_change(ChangeEvent::text("email", "ada@"), &rules);
    print_form(&form, &rules);

    println!("leaving the email field:");
    form.on_blur(BlurEvent::new("email"), &rules);
    print_form(&form, &rules);

    println!("fixing the email:");
    form.on_change(ChangeEvent::text("email", "ada@example.com"), &rules);
    print_form(&form, &rules);

    println!("submitting early:");
    if let Submission::Blocked(errors) = form.submit(&rules, |_| ()) {
        println!("  blocked by {} field(s)", errors.len());
    }
    print_form(&form, &rules);

    println!("completing the form:");
    form.on_change(ChangeEvent::text("password", "analytical-engine"), &rules);
    form.on_change(ChangeEvent::text("confirm", "analytical-engine"), &rules);
    form.on_change(ChangeEvent::text("pin", "123456"), &rules);
    form.on_change(ChangeEvent::checkbox("terms", true), &rules);

    let outcome = form.submit(&rules, |values| serde_json::to_string_pretty(values));
    match outcome {
        Submission::Submitted(payload) => println!("submitted:\n{}", payload?),
        Submission::Blocked(errors) => {
            for error in errors {
                println!("  {error}");
            }
        }
    }

    Ok(())
}
