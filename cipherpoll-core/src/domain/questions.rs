/// One multiple-choice question. Option rank (1-based position) is the
/// score contribution when selected.
#[derive(Clone, Copy, Debug)]
pub struct Question {
    pub id: u32,
    pub prompt: &'static str,
    pub options: &'static [&'static str],
}

static QUESTION_BANK: &[Question] = &[
    Question {
        id: 1,
        prompt: "In social situations, you usually:",
        options: &[
            "Start conversations yourself",
            "Wait for others to speak first",
            "Observe the surroundings",
            "Look for a quiet corner",
        ],
    },
    Question {
        id: 2,
        prompt: "When making decisions, you rely more on:",
        options: &["Logical analysis", "Gut feeling", "Other people's opinions", "Past experience"],
    },
    Question {
        id: 3,
        prompt: "Under pressure, you tend to:",
        options: &["Draw up a plan", "Seek support", "Think it through alone", "Step away for a while"],
    },
    Question {
        id: 4,
        prompt: "When learning something new, you prefer:",
        options: &["Hands-on practice", "Studying the theory", "Group discussion", "Exploring on your own"],
    },
    Question {
        id: 5,
        prompt: "On a free weekend, you are most likely to:",
        options: &["Join a gathering", "Rest at home", "Get outdoors", "Study something"],
    },
];

pub fn question_bank() -> &'static [Question] {
    QUESTION_BANK
}

pub fn question_count() -> usize {
    QUESTION_BANK.len()
}
