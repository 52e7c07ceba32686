use serde::{Deserialize, Serialize};

/// A configured lottery variant. Supplied by the host, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub name: String,
    pub min: u32,
    pub max: u32,
    pub result_num_count: usize,
    pub color: String,
    /// Top-prize label.
    pub win: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history_url: Option<String>,
}

const PAST_DRAWINGS_URL: &str = "https://walottery.com/WinningNumbers/PastDrawings.aspx";

impl Game {
    pub fn new(name: impl Into<String>, min: u32, max: u32, result_num_count: usize) -> Self {
        Self {
            name: name.into(),
            min,
            max,
            result_num_count,
            color: "#ffffff".to_string(),
            win: String::new(),
            history_url: None,
        }
    }

    pub fn with_display(mut self, color: impl Into<String>, win: impl Into<String>) -> Self {
        self.color = color.into();
        self.win = win.into();
        self
    }

    /// A zero lower bound marks the keno/pop family where repeats are meaningful.
    pub fn allows_repeats(&self) -> bool {
        self.min == 0
    }

    /// Past winning numbers page used to ground the AI prompt.
    /// Empty when the game is unknown and the catalog gave no override.
    pub fn history_url(&self) -> String {
        if let Some(url) = &self.history_url {
            return url.clone();
        }
        let slug = match self.name.as_str() {
            "pick3" => "pick3",
            "match4" => "match4",
            "hit5" => "hit5",
            "keno" => "dailykeno",
            "cashPop" => "cashpop",
            "lotto" => "lotto",
            _ => return String::new(),
        };
        format!("{PAST_DRAWINGS_URL}?gamename={slug}&unittype=year&unitcount=2023")
    }

    /// Checks a drawn sequence against the count, bounds and repeat policy.
    pub fn check_draw(&self, numbers: &[u32]) -> Result<(), String> {
        if numbers.len() != self.result_num_count {
            return Err(format!(
                "expected {} numbers for {}, got {}",
                self.result_num_count,
                self.name,
                numbers.len()
            ));
        }
        if let Some(n) = numbers.iter().find(|n| !(self.min..=self.max).contains(*n)) {
            return Err(format!("{n} is outside {}..={}", self.min, self.max));
        }
        if !self.allows_repeats() {
            for (i, n) in numbers.iter().enumerate() {
                if numbers[..i].contains(n) {
                    return Err(format!("{n} is repeated but {} forbids repeats", self.name));
                }
            }
        }
        Ok(())
    }
}
