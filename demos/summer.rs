use argspec::{
    FlagSpec, Outcome, PositionalSpec, Source, Specification, Trigger, TriggerError,
    ValidationError, Validator,
};
use futures::executor::block_on;
use serde_json::json;

fn parse(name: &str, token: &str) -> Result<i64, TriggerError> {
    token
        .parse()
        .map_err(|_| TriggerError::new(format!("'{token}' is not a valid {name}.")))
}

fn main() {
    let reader = Specification::new()
        .description(Source::with(|| {
            format!("Sums a range of integers (v{}).", env!("CARGO_PKG_VERSION"))
        }))
        .flag(
            's',
            FlagSpec::new(
                "The step between items.",
                Trigger::new(["step"], |args| Ok(Outcome::set("step", parse("step", &args[0])?))),
            )
            .long("step")
            .default_value(Outcome::set("step", 1)),
        )
        .flag(
            'v',
            FlagSpec::new("Print each item.", Trigger::set("verbose", true)).long("verbose"),
        )
        .positional(
            PositionalSpec::structured(
                "range",
                Trigger::future(["low", "high"], |args| async move {
                    let low = parse("low", &args[0])?;
                    let high = parse("high", &args[1])?;
                    Ok::<_, TriggerError>(Outcome::from_value(
                        json!({"range": {"low": low, "high": high}}),
                    )?)
                }),
            )
            .description("The inclusive bounds."),
        )
        .allow_extra()
        .validate(Validator::new(|options| {
            match options.get("step").and_then(|step| step.as_i64()) {
                Some(step) if step > 0 => Ok(Outcome::NoChange),
                _ => Err(ValidationError::new("The step must be positive.")),
            }
        }))
        .footer("Ignores any trailing tokens.")
        .build();

    let arguments: Vec<String> = std::env::args().skip(1).collect();
    let tokens: Vec<&str> = arguments.iter().map(AsRef::as_ref).collect();
    let options = match block_on(reader.read(tokens.as_slice())) {
        Ok(options) => options,
        Err(error) => std::process::exit(error.exit_code()),
    };

    let value = options.into_value();
    let low = value["range"]["low"].as_i64().unwrap_or_default();
    let high = value["range"]["high"].as_i64().unwrap_or_default();
    let step = value["step"].as_i64().unwrap_or(1);
    let mut sum = 0;

    for item in (low..=high).step_by(step as usize) {
        if value.get("verbose").is_some() {
            println!("{item}");
        }

        sum += item;
    }

    println!("Sum: {sum}");
}
