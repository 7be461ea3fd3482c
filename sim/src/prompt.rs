//! Console prompts that build a [`WorldConfig`] before the window opens.
//!
//! Every prompt blocks on one line of input. Answers that are not recognised re-prompt;
//! only I/O failures and end of input are reported as errors.

use std::io::{BufRead, Write};

use crate::{
    config::{Placement, SpeedTier, WorldConfig},
    constants::SUGGESTED_SPHERE_COUNT,
    error::{Result, SimError},
};

const PLACEMENT_PROMPT: &str =
    "Please type 'y' to have spheres be positioned 3-Dimensionally or 'n' to eliminate the Z-Axis positioning ";
const SPEED_PROMPT: &str = "Please type 'f' to have spheres move fast or 's' to have spheres move slow ";

/// Ask the three configuration questions in order: placement, speed, sphere count.
pub fn read_config<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<WorldConfig> {
    let placement = ask(input, output, "placement", PLACEMENT_PROMPT, parse_placement)?;
    let speed = ask(input, output, "speed", SPEED_PROMPT, parse_speed)?;
    let count_prompt = format!(
        "Please enter the number of spheres you would like to populate the world with. \
         Suggested nominal number is {SUGGESTED_SPHERE_COUNT} or less. "
    );
    let sphere_count = ask(input, output, "sphere count", &count_prompt, parse_count)?;

    Ok(WorldConfig::new(placement, speed, sphere_count))
}

fn parse_placement(answer: &str) -> Option<Placement> {
    match answer {
        "y" => Some(Placement::Volumetric),
        "n" => Some(Placement::Planar),
        _ => None,
    }
}

fn parse_speed(answer: &str) -> Option<SpeedTier> {
    match answer {
        "f" => Some(SpeedTier::Fast),
        "s" => Some(SpeedTier::Slow),
        _ => None,
    }
}

fn parse_count(answer: &str) -> Option<usize> {
    answer.parse().ok()
}

/// Print `prompt` and read lines until `parse` accepts one.
fn ask<R, W, T>(
    input: &mut R,
    output: &mut W,
    name: &'static str,
    prompt: &str,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<T>
where
    R: BufRead,
    W: Write,
{
    let mut line = String::new();
    loop {
        output.write_all(prompt.as_bytes())?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Err(SimError::InputClosed(name));
        }

        if let Some(value) = parse(line.trim()) {
            return Ok(value);
        }
        log::debug!("rejected {name} answer {:?}", line.trim());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run(script: &str) -> (Result<WorldConfig>, String) {
        let mut input = Cursor::new(script.as_bytes().to_vec());
        let mut output = Vec::new();
        let result = read_config(&mut input, &mut output);
        (result, String::from_utf8(output).unwrap())
    }

    #[test]
    fn accepts_planar_slow_five() {
        let (config, _) = run("n\ns\n5\n");
        let config = config.unwrap();
        assert_eq!(config.placement, Placement::Planar);
        assert_eq!(config.speed, SpeedTier::Slow);
        assert_eq!(config.sphere_count, 5);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn accepts_volumetric_fast_zero() {
        let (config, _) = run("y\nf\n0\n");
        let config = config.unwrap();
        assert_eq!(config.placement, Placement::Volumetric);
        assert_eq!(config.speed, SpeedTier::Fast);
        assert_eq!(config.sphere_count, 0);
    }

    #[test]
    fn invalid_answers_reprompt() {
        let (config, transcript) = run("maybe\nY\n y \nquick\ns\nlots\n-4\n12\n");
        let config = config.unwrap();
        assert_eq!(config.placement, Placement::Volumetric);
        assert_eq!(config.sphere_count, 12);

        // Two rejected placement answers, one rejected speed, two rejected counts.
        assert_eq!(transcript.matches(PLACEMENT_PROMPT).count(), 3);
        assert_eq!(transcript.matches(SPEED_PROMPT).count(), 2);
        assert_eq!(transcript.matches("Suggested nominal number is 300").count(), 3);
    }

    #[test]
    fn closed_input_is_fatal() {
        let (config, _) = run("y\n");
        assert!(matches!(config, Err(SimError::InputClosed("speed"))));
    }
}
