use crate::adapters::storage::{LoadOutcome, PersistenceAdapter, WriteMode};
use crate::core::archive::{ArchiveListing, ItineraryArchive};
use crate::core::itinerary::request_itinerary;
use crate::core::store::{DestinationStore, StorePolicy};
use crate::core::{ConfigProvider, ItineraryGenerator};
use crate::utils::error::{PlannerError, Result};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::str::FromStr;

const MENU: &str = "\nTravel Itinerary Planner Menu:
1. Add Destination
2. Remove Destination
3. Update Destination
4. View All Destinations
5. Search Destination
6. AI Travel Assistance (Generate Itinerary)
7. Save All Destinations
8. Load Saved AI Itinerary
9. Exit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Add,
    Remove,
    Update,
    ViewAll,
    Search,
    GenerateItinerary,
    SaveAll,
    LoadItinerary,
    Exit,
}

impl FromStr for MenuChoice {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "1" => Ok(MenuChoice::Add),
            "2" => Ok(MenuChoice::Remove),
            "3" => Ok(MenuChoice::Update),
            "4" => Ok(MenuChoice::ViewAll),
            "5" => Ok(MenuChoice::Search),
            "6" => Ok(MenuChoice::GenerateItinerary),
            "7" => Ok(MenuChoice::SaveAll),
            "8" => Ok(MenuChoice::LoadItinerary),
            "9" => Ok(MenuChoice::Exit),
            _ => Err(PlannerError::validation("Invalid choice. Please select 1-9.")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// Interactive loop over a destination store, its data file and the
/// itinerary archive. Input and output are injected so sessions can be
/// scripted.
pub struct MenuShell<R, W, G> {
    store: DestinationStore,
    persistence: PersistenceAdapter,
    data_file: PathBuf,
    archive: ItineraryArchive,
    generator: G,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write, G: ItineraryGenerator> MenuShell<R, W, G> {
    pub fn from_config<C: ConfigProvider>(config: &C, generator: G, input: R, output: W) -> Self {
        let write_mode = if config.atomic_writes() {
            WriteMode::AtomicRename
        } else {
            WriteMode::Overwrite
        };
        let persistence = PersistenceAdapter::new(write_mode);
        let policy = StorePolicy {
            reject_duplicate_city: config.reject_duplicate_city(),
        };

        Self {
            store: DestinationStore::with_policy(policy),
            persistence,
            data_file: PathBuf::from(config.data_file()),
            archive: ItineraryArchive::new(config.itinerary_dir(), persistence),
            generator,
            input,
            output,
        }
    }

    pub fn into_parts(self) -> (DestinationStore, W) {
        (self.store, self.output)
    }

    /// Loads the data file, then serves menu choices until Exit or end of
    /// input. Both end with a final save.
    pub async fn run(&mut self) -> Result<()> {
        self.load_destinations()?;

        loop {
            writeln!(self.output, "{}", MENU)?;
            let Some(choice) = self.prompt("Enter your choice (1-9): ")? else {
                break;
            };

            let flow = match choice.parse::<MenuChoice>() {
                Ok(choice) => self.dispatch(choice).await,
                Err(e) => Err(e),
            };

            match flow {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => break,
                Err(e) => {
                    tracing::warn!("{} (category: {:?})", e, e.category());
                    writeln!(self.output, "{}", e.user_friendly_message())?;
                }
            }
        }

        self.save_destinations()?;
        writeln!(
            self.output,
            "\nThank you for using the AI Travel Itinerary Planner. Safe travels!"
        )?;
        Ok(())
    }

    async fn dispatch(&mut self, choice: MenuChoice) -> Result<Flow> {
        tracing::debug!("Menu choice: {:?}", choice);
        match choice {
            MenuChoice::Add => self.add_destination(),
            MenuChoice::Remove => self.remove_destination(),
            MenuChoice::Update => self.update_destination(),
            MenuChoice::ViewAll => self.view_destinations(),
            MenuChoice::Search => self.search_destinations(),
            MenuChoice::GenerateItinerary => self.generate_itinerary().await,
            MenuChoice::SaveAll => self.save_destinations().map(|_| Flow::Continue),
            MenuChoice::LoadItinerary => self.load_itinerary(),
            MenuChoice::Exit => Ok(Flow::Exit),
        }
    }

    /// `None` once input is exhausted.
    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Prompts for each label in turn; `None` if input ends part way.
    fn prompt_all<const N: usize>(&mut self, labels: [&str; N]) -> Result<Option<[String; N]>> {
        let mut answers: [String; N] = std::array::from_fn(|_| String::new());
        for (answer, label) in answers.iter_mut().zip(labels) {
            match self.prompt(label)? {
                Some(value) => *answer = value,
                None => return Ok(None),
            }
        }
        Ok(Some(answers))
    }

    fn load_destinations(&mut self) -> Result<()> {
        match self.persistence.load(&self.data_file)? {
            LoadOutcome::Loaded(records) => {
                self.store.replace_all(records);
                writeln!(self.output, "Destinations loaded successfully.")?;
            }
            LoadOutcome::NoFile => {
                writeln!(self.output, "No saved destination file found.")?;
            }
        }
        Ok(())
    }

    fn save_destinations(&mut self) -> Result<()> {
        self.persistence.save(self.store.records(), &self.data_file)?;
        writeln!(self.output, "All destinations saved successfully.")?;
        Ok(())
    }

    fn add_destination(&mut self) -> Result<Flow> {
        let Some([city, country, start, end, budget, activities]) = self.prompt_all([
            "City: ",
            "Country: ",
            "Start Date (YYYY-MM-DD): ",
            "End Date (YYYY-MM-DD): ",
            "Budget: ",
            "Activities (comma-separated): ",
        ])?
        else {
            return Ok(Flow::Exit);
        };

        self.store
            .add(&city, &country, &start, &end, &budget, &activities)?;
        writeln!(
            self.output,
            "\nDestination '{}, {}' added successfully.",
            city, country
        )?;
        Ok(Flow::Continue)
    }

    fn remove_destination(&mut self) -> Result<Flow> {
        let Some(city) = self.prompt("Enter city to remove: ")? else {
            return Ok(Flow::Exit);
        };

        let removed = self.store.remove_all(&city)?;
        tracing::info!("Removed {} record(s) for '{}'", removed, city);
        writeln!(self.output, "Destination '{}' removed successfully.", city)?;
        Ok(Flow::Continue)
    }

    fn update_destination(&mut self) -> Result<Flow> {
        let Some([city, country, start, end, budget, activities]) = self.prompt_all([
            "City to update: ",
            "New Country: ",
            "New Start Date: ",
            "New End Date: ",
            "New Budget: ",
            "New Activities (comma-separated): ",
        ])?
        else {
            return Ok(Flow::Exit);
        };

        self.store
            .update_first(&city, &country, &start, &end, &budget, &activities)?;
        writeln!(self.output, "\nDestination '{}' updated successfully!", city)?;
        Ok(Flow::Continue)
    }

    fn view_destinations(&mut self) -> Result<Flow> {
        match self.store.view() {
            Some(listing) => writeln!(self.output, "\nSaved Destinations:\n{}", listing)?,
            None => writeln!(self.output, "\nNo destinations found.")?,
        }
        Ok(Flow::Continue)
    }

    fn search_destinations(&mut self) -> Result<Flow> {
        let Some(query) = self.prompt("Enter a city, country, or activity to search: ")? else {
            return Ok(Flow::Exit);
        };

        let results = self.store.search(&query);
        if results.is_empty() {
            writeln!(self.output, "No matching results.")?;
            return Ok(Flow::Continue);
        }

        writeln!(self.output, "\nSearch Results:")?;
        for dest in results {
            writeln!(
                self.output,
                "{}, {} | Activities: {}",
                dest.city,
                dest.country,
                dest.activities.join(", ")
            )?;
        }
        Ok(Flow::Continue)
    }

    async fn generate_itinerary(&mut self) -> Result<Flow> {
        writeln!(self.output, "\nGenerate a Daily Travel Itinerary")?;

        let Some(destination) = self.prompt("Enter your destination: ")? else {
            return Ok(Flow::Exit);
        };
        if destination.trim().is_empty() {
            return Err(PlannerError::validation("Destination cannot be empty."));
        }
        let Some([days, interests]) = self.prompt_all([
            "How many days are you staying? ",
            "What are your interests? (e.g., history, food, adventure): ",
        ])?
        else {
            return Ok(Flow::Exit);
        };

        let (request, itinerary) =
            request_itinerary(&self.generator, &destination, &days, &interests).await?;
        writeln!(
            self.output,
            "\nYour AI-Powered Travel Itinerary:\n\n{}",
            itinerary
        )?;

        let Some(answer) = self.prompt("\nWould you like to save this itinerary? (yes/no): ")?
        else {
            return Ok(Flow::Exit);
        };
        if !matches!(answer.trim().to_lowercase().as_str(), "yes" | "y") {
            return Ok(Flow::Continue);
        }

        let Some(format) = self.prompt("Save as 'txt' or 'json'? ")? else {
            return Ok(Flow::Exit);
        };
        let path = self.archive.save_artifact(
            &itinerary,
            request.destination(),
            &format.trim().to_lowercase(),
        )?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        writeln!(self.output, "Itinerary saved as '{}'.", file_name)?;
        Ok(Flow::Continue)
    }

    fn load_itinerary(&mut self) -> Result<Flow> {
        let files = match self.archive.list_saved()? {
            ArchiveListing::NoDirectory => {
                writeln!(self.output, "No saved itineraries folder found.")?;
                return Ok(Flow::Continue);
            }
            ArchiveListing::Empty => {
                writeln!(self.output, "No itinerary files found.")?;
                return Ok(Flow::Continue);
            }
            ArchiveListing::Files(files) => files,
        };

        writeln!(self.output, "\nSaved Itineraries:")?;
        for (i, file) in files.iter().enumerate() {
            writeln!(self.output, "{}. {}", i + 1, file)?;
        }

        let Some(choice) = self.prompt("Enter the number of the itinerary to load: ")? else {
            return Ok(Flow::Exit);
        };
        let selection: usize =
            choice
                .trim()
                .parse()
                .map_err(|_| PlannerError::InvalidSelection {
                    selection: choice.trim().to_string(),
                    available: files.len(),
                })?;

        let artifact = self.archive.load_artifact(selection)?;
        writeln!(
            self.output,
            "\nLoaded Itinerary for {}:\n\n{}",
            artifact.destination, artifact.itinerary
        )?;
        Ok(Flow::Continue)
    }
}
