//! Banner script: the lines fed to the reveal scheduler.
//!
//! The first and last lines frame the animation (a typed install command
//! and a success marker); the middle is a random subset of a log-message
//! pool, shuffled.  Sampling happens once per mount with an injected RNG so
//! tests can pin the outcome with a seed.

use rand::seq::SliceRandom;
use rand::Rng;

/// The command "typed" on the first line.
pub const DEFAULT_COMMAND: &str = "apt install --without-bad-practices devops";

/// Success marker printed on the last line.
pub const DEFAULT_FOOTER: &str = "✔ devops installed, happy shipping!";

const DEFAULT_POOL: &[&str] = &[
    "Reading package lists... Done",
    "Resolving dependencies: terraform, ansible, kubectl",
    "Fetching container images from registry",
    "Removing manual-deploy.sh (unused)",
    "Configuring CI pipeline: lint, test, build, deploy",
    "Enabling infrastructure as code",
    "Rotating secrets out of plain-text .env files",
    "Setting up monitoring and alerting",
    "Pinning base images to immutable digests",
    "Generating runbooks for on-call",
    "Replacing snowflake servers with cattle",
    "Writing blameless postmortem template",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BannerScript {
    pub command: String,
    pub pool: Vec<String>,
    pub footer: String,
    /// How many pool entries make it into one playback.
    pub sample_size: usize,
}

impl Default for BannerScript {
    fn default() -> Self {
        Self {
            command: DEFAULT_COMMAND.to_string(),
            pool: DEFAULT_POOL.iter().map(|s| s.to_string()).collect(),
            footer: DEFAULT_FOOTER.to_string(),
            sample_size: 4,
        }
    }
}

impl BannerScript {
    /// Draw one playback: command, a shuffled sample of the pool without
    /// replacement, then the footer.
    pub fn sample_lines<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<String> {
        let mut middle = self.pool.clone();
        middle.shuffle(rng);
        middle.truncate(self.sample_size);

        let mut lines = Vec::with_capacity(middle.len() + 2);
        lines.push(self.command.clone());
        lines.extend(middle);
        lines.push(self.footer.clone());
        lines
    }
}
