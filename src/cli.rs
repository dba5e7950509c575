use crate::{
    api::PetFriends, config::Settings, logger, models::pet::PetFilter, scenarios::Scenario,
};
use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Run only these scenarios, in the given order
    #[arg(short, long, value_enum, num_args = 1..)]
    only: Vec<Scenario>,
}

#[derive(Args, Debug, Clone)]
pub struct PetsArgs {
    #[arg(short, long, value_enum, default_value_t = PetFilter::MyPets)]
    filter: PetFilter,
}

#[derive(Subcommand, Clone, Debug)]
pub enum Action {
    /// Print the scenario names
    List,
    /// Run scenarios against the configured service
    Run(RunArgs),
    /// Print the pets visible to the valid user
    Pets(PetsArgs),
}

/// Pet Friends API scenario runner
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct AppArgs {
    #[command(subcommand)]
    pub action: Action,
}

impl AppArgs {
    pub async fn run(&self) -> anyhow::Result<()> {
        match &self.action {
            Action::List => {
                for scenario in Scenario::ALL {
                    println!("{scenario}");
                }
                Ok(())
            }
            Action::Run(RunArgs { only }) => {
                let settings = Settings::load()?;
                logger::setup_simple_logger(settings.log_level_filter()?)?;

                let scenarios = if only.is_empty() {
                    Scenario::ALL.to_vec()
                } else {
                    only.clone()
                };

                run_scenarios(&settings, &scenarios).await
            }
            Action::Pets(PetsArgs { filter }) => {
                let settings = Settings::load()?;
                logger::setup_simple_logger(settings.log_level_filter()?)?;

                print_pets(&settings, *filter).await
            }
        }
    }
}

/// Runs `scenarios` one after another, each with its own client.
pub async fn run_scenarios(settings: &Settings, scenarios: &[Scenario]) -> anyhow::Result<()> {
    let mut failed = Vec::new();

    for scenario in scenarios {
        let client = PetFriends::from_settings(settings)?;

        match scenario.run(&client, settings).await {
            Ok(()) => log::info!("PASS {scenario}"),
            Err(e) => {
                log::error!("FAIL {scenario}: {e:#}");
                failed.push(scenario.to_string());
            }
        }
    }

    log::info!(
        "{passed} passed, {failed} failed",
        passed = scenarios.len() - failed.len(),
        failed = failed.len()
    );

    if !failed.is_empty() {
        bail!("failed scenarios: {}", failed.join(", "));
    }
    Ok(())
}

async fn print_pets(settings: &Settings, filter: PetFilter) -> anyhow::Result<()> {
    let client = PetFriends::from_settings(settings)?;

    let key_response = client.get_api_key(&settings.valid_credentials()).await?;
    let auth_key = key_response
        .auth_key()
        .with_context(|| format!("no auth key issued, status {}", key_response.status))?;

    let response = client.get_list_of_pets(&auth_key, filter).await?;
    for pet in response.pets()? {
        println!(
            "{id}\t{name}\t{animal_type}\t{age}",
            id = pet.id,
            name = pet.name,
            animal_type = pet.animal_type,
            age = pet.age
        );
    }
    Ok(())
}
