// SPDX-FileCopyrightText: 2026 Honorbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Durations rendered as Russian text, e.g. `1 день 3 часа`.

const DAY_MS: i64 = 86_400_000;
const HOUR_MS: i64 = 3_600_000;
const MINUTE_MS: i64 = 60_000;
const SECOND_MS: i64 = 1_000;

/// Grammatical case of the minute and second words.
///
/// `Accusative` reads after a preposition ("через 1 минуту"), `Nominative`
/// stands alone ("1 минута"). Days and hours are spelled the same in both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Case {
    #[default]
    Accusative,
    Nominative,
}

/// Word forms for 1, for 2-4 and for 5+.
struct Forms {
    one: &'static str,
    few: &'static str,
    many: &'static str,
}

impl Forms {
    fn pick(&self, n: i64) -> &'static str {
        let (tens, units) = (n % 100, n % 10);
        if units == 1 && tens != 11 {
            self.one
        } else if (2..=4).contains(&units) && !(12..=14).contains(&tens) {
            self.few
        } else {
            self.many
        }
    }
}

fn unit_forms(case: Case) -> [Forms; 4] {
    let (minute, second) = match case {
        Case::Accusative => ("минуту", "секунду"),
        Case::Nominative => ("минута", "секунда"),
    };
    [
        Forms { one: "день", few: "дня", many: "дней" },
        Forms { one: "час", few: "часа", many: "часов" },
        Forms { one: minute, few: "минуты", many: "минут" },
        Forms { one: second, few: "секунды", many: "секунд" },
    ]
}

/// Render the two coarsest units starting at the first non-zero one,
/// omitting zero components.
///
/// The starting unit is never finer than minutes, so sub-minute values
/// render as seconds only. Anything below one second (including negative
/// input) renders as an empty string; callers substitute a fallback.
pub fn format_elapsed(ms: i64, case: Case) -> String {
    let ms = ms.max(0);
    let parts = [
        ms / DAY_MS,
        ms / HOUR_MS % 24,
        ms / MINUTE_MS % 60,
        ms / SECOND_MS % 60,
    ];
    let Some(first) = parts.iter().position(|p| *p != 0) else {
        return String::new();
    };
    let start = first.min(2);
    let forms = unit_forms(case);

    (start..start + 2)
        .filter(|i| parts[*i] != 0)
        .map(|i| format!("{} {}", parts[i], forms[i].pick(parts[i])))
        .collect::<Vec<_>>()
        .join(" ")
}
