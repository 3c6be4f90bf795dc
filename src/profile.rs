use serde::{Deserialize, Serialize};

use crate::{assets, error::Result};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Socials {
    pub github: String,
    pub linkedin: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AboutItem {
    pub label: String,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Experience {
    pub company: String,
    pub role: String,
    pub period: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Project {
    pub name: String,
    pub tech: String,
    pub description: String,
    pub url: String,
}

/// Portfolio data the console shows and hands to the assistant
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    pub name: String,
    pub title: String,
    pub email: String,
    pub socials: Socials,
    pub about: Vec<AboutItem>,
    pub experience: Vec<Experience>,
    pub projects: Vec<Project>,
    pub skills: Vec<String>,
}

impl Profile {
    pub fn embedded() -> Result<Self> {
        assets::read_json("profile.json")
    }

    pub fn about_lines(&self) -> Vec<String> {
        self.about
            .iter()
            .map(|item| format!("{}: {}", item.label, item.text))
            .collect()
    }

    pub fn experience_lines(&self) -> Vec<String> {
        self.experience
            .iter()
            .map(|e| format!("{} @ {} ({})", e.role, e.company, e.period))
            .collect()
    }

    pub fn project_lines(&self) -> Vec<String> {
        self.projects
            .iter()
            .map(|p| format!("{} [{}] {}", p.name, p.tech, p.url))
            .collect()
    }

    /// Instructions for the assistant, carrying the whole profile as json
    pub fn system_prompt(&self) -> Result<String> {
        let data = serde_json::to_string(self)?;
        Ok(format!(
            "You are a terminal interface assistant for {}'s portfolio. You have access to the following JSON data about them: {}. Answer the user's question briefly and accurately based strictly on this data. Use a cool, slightly robotic or hacker-like tone. If the answer isn't in the data, say \"Data corrupted or missing.\"",
            self.name, data
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_profile_loads() {
        let profile = Profile::embedded().unwrap();

        assert!(!profile.name.is_empty());
        assert_eq!(profile.experience.len(), 3);
        assert!(profile.skills.contains(&"Python".to_string()));
    }

    #[test]
    fn test_section_lines() {
        let profile = Profile::embedded().unwrap();

        assert_eq!(profile.about_lines().len(), profile.about.len());
        assert!(profile.about_lines()[0].starts_with("Previously: "));
        assert!(profile.project_lines()[0].contains(&profile.projects[0].url));
    }

    #[test]
    fn test_system_prompt_embeds_profile_json() {
        let profile = Profile::embedded().unwrap();
        let prompt = profile.system_prompt().unwrap();

        assert!(prompt.contains(&profile.name));
        assert!(prompt.contains("\"skills\":["));
        assert!(prompt.ends_with("\"Data corrupted or missing.\""));
    }
}
