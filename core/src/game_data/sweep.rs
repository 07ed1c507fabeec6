//! Macro-button sweep generation.
//!
//! Emits button definition lines for an in-game social page that sweeps
//! `/who all` across a level span, one class at a time. Five command lines
//! fit on a button and twelve buttons on a page; levels advance in strides
//! of two through 23 and singly after (the spread of the population thins
//! out at higher levels, so single-level sweeps stay under the server's
//! result cap).

use super::{CLASS_ORDER, CLASSES};

pub fn generate_sweep(start_level: u32, end_level: u32, start_page: u32) -> Vec<String> {
    let mut commands = Vec::new();

    let mut page = start_page;
    let mut button = 1u32;
    let mut line = 1u32;
    let mut level = start_level;

    while level <= end_level {
        for keyword in CLASS_ORDER {
            let Some(class) = CLASSES.get(keyword) else {
                continue;
            };

            if line == 1 {
                let label_levels = if level <= 23 {
                    format!("{}-{}", level, level + 1)
                } else {
                    level.to_string()
                };
                commands.push(format!(
                    "Page{page}Button{button}Name={} {label_levels}",
                    class.button_label
                ));
                commands.push(format!("Page{page}Button{button}Color=0"));
            }

            let who = if level <= 23 {
                format!("/pause 20, /who all {} {} {}", level, level + 1, class.who_keyword)
            } else {
                format!("/pause 20, /who all {} {}", level, class.who_keyword)
            };
            commands.push(format!("Page{page}Button{button}Line{line}={who}"));

            line += 1;
            if line > 5 {
                line = 1;
                button += 1;
                if button > 12 {
                    page += 1;
                    button = 1;
                }
            }
        }

        level += if level <= 23 { 2 } else { 1 };
    }

    commands
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_button_layout() {
        let commands = generate_sweep(1, 2, 2);

        assert_eq!(commands[0], "Page2Button1Name=BRD 1-2");
        assert_eq!(commands[1], "Page2Button1Color=0");
        assert_eq!(commands[2], "Page2Button1Line1=/pause 20, /who all 1 2 bard");
        assert_eq!(commands[3], "Page2Button1Line2=/pause 20, /who all 1 2 cleric");
        assert_eq!(commands[6], "Page2Button1Line5=/pause 20, /who all 1 2 magician");
        // Sixth class rolls onto button 2, which gets its own name/color.
        assert_eq!(commands[7], "Page2Button2Name=MNK 1-2");
        assert_eq!(commands[9], "Page2Button2Line1=/pause 20, /who all 1 2 monk");
    }

    #[test]
    fn test_high_levels_sweep_singly() {
        let commands = generate_sweep(25, 25, 1);

        assert_eq!(commands[0], "Page1Button1Name=BRD 25");
        assert_eq!(commands[2], "Page1Button1Line1=/pause 20, /who all 25 bard");
        assert!(commands.iter().all(|c| !c.contains("25 26")));
    }

    #[test]
    fn test_level_stride_two_through_23_then_one() {
        let commands = generate_sweep(22, 25, 1);
        let joined = commands.join("\n");

        // 22 strides to 24 (22-23 swept as a pair), then 24 and 25 singly.
        assert!(joined.contains("/who all 22 23 bard"));
        assert!(!joined.contains("/who all 23 24"));
        assert!(joined.contains("/who all 24 bard"));
        assert!(joined.contains("/who all 25 bard"));
    }

    #[test]
    fn test_page_rollover_after_twelve_buttons() {
        // 14 classes x 11 level steps = 154 command lines at 5 per button:
        // enough to spill past button 12 of the starting page.
        let commands = generate_sweep(1, 21, 1);
        assert!(commands.iter().any(|c| c.starts_with("Page2Button1Name=")));
    }
}
