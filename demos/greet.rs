use argspec::{FlagSpec, Outcome, PositionalSpec, Specification, Trigger};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Greet {
    name: String,
    loud: bool,
    target: String,
}

fn main() {
    let reader = Specification::new()
        .description("Greets a target, by name.")
        .flag(
            'n',
            FlagSpec::new(
                "The name to greet with.",
                Trigger::new(["name"], |args| Ok(Outcome::set("name", args[0].as_str()))),
            )
            .long("name")
            .required(),
        )
        .flag(
            'l',
            FlagSpec::new("Greet loudly.", Trigger::set("loud", true))
                .long("loud")
                .default_value(Outcome::set("loud", false)),
        )
        .positional(PositionalSpec::named("target").description("Who to greet."))
        .footer("Exits with 1 on invalid input.")
        .build();

    let greet: Greet = match reader.read_args().map(|options| options.deserialize()) {
        Ok(Ok(greet)) => greet,
        Ok(Err(error)) => {
            eprintln!("{error}");
            std::process::exit(1);
        }
        Err(error) => std::process::exit(error.exit_code()),
    };

    let message = format!("Hello {}, from {}.", greet.target, greet.name);

    if greet.loud {
        println!("{}", message.to_uppercase());
    } else {
        println!("{message}");
    }
}
