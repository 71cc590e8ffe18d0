use log::debug;
use std::env;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use rasoi::display;
use rasoi::{App, AppConfig, GenerationOutcome, GoogleProvider, RasoiError, RecipeId};

const USAGE: &str = "Usage:
  rasoi list [--search TERM] [--tag TAG]
  rasoi tags
  rasoi show <ID>
  rasoi featured
  rasoi generate <QUERY...> [--api-key KEY] [--cook]
  rasoi cook <ID>";

#[derive(Debug, PartialEq)]
enum Command {
    List {
        search: Option<String>,
        tag: Option<String>,
    },
    Tags,
    Show(RecipeId),
    Featured,
    Generate {
        query: String,
        api_key: Option<String>,
        cook: bool,
    },
    Cook(RecipeId),
}

fn parse_id(arg: Option<&String>) -> Result<RecipeId, String> {
    let arg = arg.ok_or("Please provide a recipe id")?;
    arg.parse()
        .map_err(|_| format!("'{}' is not a valid recipe id", arg))
}

impl Command {
    fn parse(args: &[String]) -> Result<Self, String> {
        let (name, rest) = args.split_first().ok_or(USAGE)?;
        match name.as_str() {
            "list" => {
                let mut search = None;
                let mut tag = None;
                let mut iter = rest.iter();
                while let Some(flag) = iter.next() {
                    let value = iter
                        .next()
                        .cloned()
                        .ok_or_else(|| format!("{} needs a value", flag))?;
                    match flag.as_str() {
                        "--search" => search = Some(value),
                        "--tag" => tag = Some(value),
                        other => return Err(format!("Unknown option '{}'\n{}", other, USAGE)),
                    }
                }
                Ok(Command::List { search, tag })
            }
            "tags" => Ok(Command::Tags),
            "show" => Ok(Command::Show(parse_id(rest.first())?)),
            "featured" => Ok(Command::Featured),
            "cook" => Ok(Command::Cook(parse_id(rest.first())?)),
            "generate" => {
                let mut words = Vec::new();
                let mut api_key = None;
                let mut cook = false;
                let mut iter = rest.iter();
                while let Some(arg) = iter.next() {
                    match arg.as_str() {
                        "--cook" => cook = true,
                        "--api-key" => {
                            api_key = Some(iter.next().cloned().ok_or("--api-key needs a value")?)
                        }
                        word => words.push(word.to_string()),
                    }
                }
                if words.is_empty() {
                    return Err("Please describe the recipe you want".to_string());
                }
                Ok(Command::Generate {
                    query: words.join(" "),
                    api_key,
                    cook,
                })
            }
            other => Err(format!("Unknown command '{}'\n{}", other, USAGE)),
        }
    }
}

type InputLines = Lines<BufReader<Stdin>>;

async fn read_line(input: &mut InputLines, prompt: &str) -> Result<Option<String>, RasoiError> {
    print!("{}", prompt);
    std::io::stdout().flush()?;
    Ok(input.next_line().await?)
}

async fn generate(
    app: &mut App,
    input: &mut InputLines,
    query: String,
    api_key: Option<String>,
) -> Result<Option<RecipeId>, Box<dyn std::error::Error>> {
    if let Some(key) = api_key.or_else(|| app.config().provider.resolve_api_key()) {
        app.set_api_key(&key);
    }
    let provider = GoogleProvider::new(&app.config().provider)?;
    app.set_ai_query(query);

    loop {
        println!("Generating...");
        match app.generate(&provider).await {
            GenerationOutcome::Created(id) => return Ok(Some(id)),
            GenerationOutcome::Failed(message) => {
                eprintln!("{}", message);
                return Ok(None);
            }
            GenerationOutcome::CredentialRequired => {
                let Some(key) = read_line(input, "Enter your Gemini API key: ").await? else {
                    return Ok(None);
                };
                if !app.set_api_key(&key) {
                    app.dismiss_credential_prompt();
                    return Err("An API key is required to use the AI generator".into());
                }
            }
            GenerationOutcome::Ignored => return Ok(None),
        }
    }
}

async fn cook(app: &mut App, input: &mut InputLines, id: RecipeId) -> Result<(), RasoiError> {
    app.start_cooking(id)?;
    println!("Enter: start/pause timer, n: complete step, p: previous step, q: exit");

    while let Some(session) = app.cooking_session_mut() {
        print!("{}", display::CookingView(session));
        std::io::stdout().flush()?;

        let line = loop {
            tokio::select! {
                line = input.next_line() => break line?,
                elapsed = session.next_tick() => {
                    print!("\rTimer: {}", display::format_time(elapsed));
                    std::io::stdout().flush()?;
                }
            }
        };

        let Some(line) = line else { break };
        if session.is_complete() {
            break;
        }
        match line.trim() {
            "" => session.toggle(),
            "n" => {
                session.complete_step();
            }
            "p" => {
                session.previous_step();
            }
            "q" => break,
            other => println!("Unknown input '{}'", other),
        }
        debug!("Step {} is {}", session.timer().index(), session.status());
    }

    app.exit_cooking();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let command = Command::parse(&args)?;

    let config = AppConfig::load()?;
    let mut app = App::new(config)?;
    let mut input = BufReader::new(tokio::io::stdin()).lines();

    match command {
        Command::List { search, tag } => {
            app.set_search_term(search.unwrap_or_default());
            app.set_tag_filter(tag.unwrap_or_default());
            print!(
                "{}",
                display::recipe_list(app.view(), &app.filtered_recipes())
            );
        }
        Command::Tags => {
            for tag in app.tags() {
                println!("{}", tag);
            }
        }
        Command::Show(id) => {
            let recipe = app.select_recipe(id)?;
            print!("{}", display::RecipeDetail(recipe));
        }
        Command::Featured => match app.featured_recipe() {
            Some(recipe) => print!("{}", display::featured(recipe)),
            None => println!("No featured recipe"),
        },
        Command::Generate {
            query,
            api_key,
            cook: then_cook,
        } => {
            if let Some(id) = generate(&mut app, &mut input, query, api_key).await? {
                if let Some(recipe) = app.current_recipe() {
                    print!("{}", display::RecipeDetail(recipe));
                }
                if then_cook {
                    cook(&mut app, &mut input, id).await?;
                }
            }
        }
        Command::Cook(id) => cook(&mut app, &mut input, id).await?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_list_with_filters() {
        let command = Command::parse(&args(&["list", "--tag", "Indian", "--search", "chai"])).unwrap();
        assert_eq!(
            command,
            Command::List {
                search: Some("chai".to_string()),
                tag: Some("Indian".to_string()),
            }
        );
    }

    #[test]
    fn test_parse_generate() {
        let command =
            Command::parse(&args(&["generate", "spicy", "tacos", "--cook", "--api-key", "k"]))
                .unwrap();
        assert_eq!(
            command,
            Command::Generate {
                query: "spicy tacos".to_string(),
                api_key: Some("k".to_string()),
                cook: true,
            }
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(Command::parse(&[]).is_err());
        assert!(Command::parse(&args(&["show", "abc"])).is_err());
        assert!(Command::parse(&args(&["generate"])).is_err());
        assert!(Command::parse(&args(&["list", "--tag"])).is_err());
        assert!(Command::parse(&args(&["bake"])).is_err());
    }

    #[test]
    fn test_parse_ids() {
        assert_eq!(Command::parse(&args(&["cook", "4"])).unwrap(), Command::Cook(4));
        assert_eq!(Command::parse(&args(&["show", "2"])).unwrap(), Command::Show(2));
    }
}
