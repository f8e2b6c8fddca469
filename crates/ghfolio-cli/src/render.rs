//! Plain-text rendering of the profile and the rotating window.

use std::fmt;

use ghfolio_core::{RepositoryItem, RotationSnapshot, UserProfile};

/// Topics shown per repository.
const MAX_TOPICS: usize = 2;

/// Profile header.
pub struct ProfileView<'a> {
    profile: &'a UserProfile,
    degraded: bool,
}

impl<'a> ProfileView<'a> {
    pub const fn new(profile: &'a UserProfile, degraded: bool) -> Self {
        Self { profile, degraded }
    }
}

impl fmt::Display for ProfileView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let profile = self.profile;
        if profile.display_name() == profile.login {
            writeln!(f, "{}", profile.login)?;
        } else {
            writeln!(f, "{} ({})", profile.display_name(), profile.login)?;
        }

        if let Some(bio) = profile.bio.as_deref().filter(|bio| !bio.is_empty()) {
            writeln!(f, "  {bio}")?;
        }

        let details: Vec<&str> = [&profile.location, &profile.company, &profile.blog]
            .into_iter()
            .filter_map(|field| field.as_deref())
            .filter(|value| !value.is_empty())
            .collect();
        if !details.is_empty() {
            writeln!(f, "  {}", details.join(" · "))?;
        }

        writeln!(
            f,
            "  repos {} · gists {} · followers {} · following {}",
            profile.public_repos, profile.public_gists, profile.followers, profile.following
        )?;
        if let Some(created_at) = profile.created_at {
            writeln!(f, "  member since {}", created_at.format("%Y-%m-%d"))?;
        }
        if !profile.html_url.is_empty() {
            writeln!(f, "  {}", profile.html_url)?;
        }
        if self.degraded {
            writeln!(f, "  (GitHub is unreachable; showing placeholder data)")?;
        }
        Ok(())
    }
}

/// One frame of the rotating repository window.
pub struct WindowView<'a> {
    snapshot: &'a RotationSnapshot<RepositoryItem>,
}

impl<'a> WindowView<'a> {
    pub const fn new(snapshot: &'a RotationSnapshot<RepositoryItem>) -> Self {
        Self { snapshot }
    }
}

impl fmt::Display for WindowView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let snapshot = self.snapshot;
        if snapshot.is_empty() {
            return writeln!(f, "No public repositories.");
        }

        writeln!(
            f,
            "[{}/{}] {}",
            snapshot.offset + 1,
            snapshot.len(),
            snapshot.state
        )?;
        for repo in snapshot.visible() {
            write_repository(f, repo)?;
        }
        if snapshot.can_navigate() {
            writeln!(f, "  {}", indicator_line(&snapshot.indicators()))?;
        }
        Ok(())
    }
}

fn write_repository(f: &mut fmt::Formatter<'_>, repo: &RepositoryItem) -> fmt::Result {
    write!(
        f,
        "  {:<24} ★ {:<6} ⑂ {:<5}",
        repo.name, repo.stargazers_count, repo.forks_count
    )?;
    if let Some(language) = &repo.language {
        write!(f, " {language}")?;
    }
    for topic in repo.display_topics(MAX_TOPICS) {
        write!(f, " #{topic}")?;
    }
    writeln!(f)?;

    if let Some(description) = repo.description.as_deref().filter(|d| !d.is_empty()) {
        writeln!(f, "    {description}")?;
    }
    Ok(())
}

/// Dots marking the current position, e.g. `● ○ ○`.
pub fn indicator_line(indicators: &[bool]) -> String {
    indicators
        .iter()
        .map(|&current| if current { "●" } else { "○" })
        .collect::<Vec<_>>()
        .join(" ")
}
