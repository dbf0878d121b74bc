//! Five-question multiple-choice quiz.

use rand::rngs::StdRng;

use super::{Animation, Component, Operation, Section};
use crate::error::VisualError;
use crate::renderer::wrap_text;
use crate::scene::{SCENE_WIDTH, Scene};
use crate::state::alerts::AlertLevel;
use crate::theme::Tone;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Question {
    pub text: &'static str,
    pub options: [&'static str; 4],
    /// Index into `options`.
    pub correct: usize,
}

pub const QUESTIONS: [Question; 5] = [
    Question {
        text: "What is the time complexity of inserting an element at the beginning of a linked list?",
        options: ["O(n)", "O(1)", "O(log n)", "O(n²)"],
        correct: 1,
    },
    Question {
        text: "Which data structure follows LIFO principle?",
        options: ["Queue", "Stack", "Linked List", "Tree"],
        correct: 1,
    },
    Question {
        text: "What is the time complexity of searching in a balanced binary search tree?",
        options: ["O(n)", "O(1)", "O(log n)", "O(n²)"],
        correct: 2,
    },
    Question {
        text: "Which algorithm is used for graph traversal?",
        options: ["Quick Sort", "DFS/BFS", "Binary Search", "Merge Sort"],
        correct: 1,
    },
    Question {
        text: "What is the average time complexity of hash table operations?",
        options: ["O(n)", "O(1)", "O(log n)", "O(n²)"],
        correct: 1,
    },
];

const OPERATIONS: &[Operation] = &[
    Operation {
        key: '1',
        label: "Option 1",
        info: "Answer: Picks the first option.",
    },
    Operation {
        key: '2',
        label: "Option 2",
        info: "Answer: Picks the second option.",
    },
    Operation {
        key: '3',
        label: "Option 3",
        info: "Answer: Picks the third option.",
    },
    Operation {
        key: '4',
        label: "Option 4",
        info: "Answer: Picks the fourth option.",
    },
    Operation {
        key: 'n',
        label: "Next",
        info: "Next: Moves on to the next question.",
    },
    Operation {
        key: 'r',
        label: "Restart",
        info: "Restart: Takes the quiz again from the first question.",
    },
];

const OPTION_X: i32 = 8;
const OPTION_WIDTH: i32 = 60;
const FIRST_OPTION_ROW: i32 = 5;

#[derive(Debug, Default)]
pub struct Quiz {
    current: usize,
    score: usize,
    /// The option picked for the current question.
    picked: Option<usize>,
}

impl Quiz {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score(&self) -> usize {
        self.score
    }

    /// Index of the question on screen, or `None` once the results show.
    pub fn current(&self) -> Option<usize> {
        (self.current < QUESTIONS.len()).then_some(self.current)
    }

    pub fn is_finished(&self) -> bool {
        self.current().is_none()
    }

    /// Score as a percentage of all questions.
    pub fn percentage(&self) -> f64 {
        self.score as f64 / QUESTIONS.len() as f64 * 100.0
    }

    /// Pick `option` for the current question. Only the first pick counts.
    pub fn answer(&mut self, option: usize) -> Animation {
        let Some(index) = self.current() else {
            return Animation::new();
        };
        if self.picked.is_some() || option >= QUESTIONS[index].options.len() {
            return Animation::new();
        }

        self.picked = Some(option);
        if option == QUESTIONS[index].correct {
            self.score += 1;
            Animation::new().success("Correct! Well done!")
        } else {
            Animation::new().with_alert(AlertLevel::Danger, "Incorrect! Try again.")
        }
    }

    pub fn next(&mut self) -> Animation {
        if !self.is_finished() {
            self.current += 1;
            self.picked = None;
        }
        Animation::new()
    }

    pub fn reset(&mut self) -> Animation {
        *self = Self::default();
        Animation::new()
    }

    fn render_question(&self, index: usize) -> Scene {
        let question = &QUESTIONS[index];
        let mut scene = Scene::new(format!("Quiz: question {} of {}", index + 1, QUESTIONS.len()))
            .with_caption(format!("Score: {}  ·  press 1-4 to answer, n for next", self.score));

        for (row, line) in wrap_text(question.text, (SCENE_WIDTH - 4) as usize).into_iter().enumerate() {
            scene.text(2, 2 + row as i32, line, Tone::Plain);
        }

        for (i, option) in question.options.iter().enumerate() {
            let tone = match self.picked {
                Some(_) if i == question.correct => Tone::Found,
                Some(p) if p == i => Tone::Removing,
                _ => Tone::Plain,
            };
            let y = FIRST_OPTION_ROW + 2 * i as i32;
            scene.bar(OPTION_X, y, OPTION_WIDTH, format!("{}. {option}", i + 1), tone);
        }
        scene
    }

    fn render_results(&self) -> Scene {
        let mut scene = Scene::new("Quiz Complete!").with_caption("press r to take the quiz again");
        let line = format!(
            "Your score: {}/{} ({:.1}%)",
            self.score,
            QUESTIONS.len(),
            self.percentage()
        );
        scene.text(OPTION_X, 4, line, Tone::Plain);
        scene.progress(OPTION_X, 6, OPTION_WIDTH, self.percentage() as f32 / 100.0, Tone::Found);
        scene
    }
}

impl Component for Quiz {
    fn id(&self) -> &'static str {
        "quiz"
    }

    fn title(&self) -> &'static str {
        "Quiz"
    }

    fn section(&self) -> Section {
        Section::Quiz
    }

    fn operations(&self) -> &'static [Operation] {
        OPERATIONS
    }

    fn perform(&mut self, key: char, _rng: &mut StdRng) -> Result<Animation, VisualError> {
        match key {
            '1'..='4' => {
                let option = key as usize - '1' as usize;
                Ok(self.answer(option))
            }
            'n' => Ok(self.next()),
            'r' => Ok(self.reset()),
            _ => Err(VisualError::UnknownOperation { key }),
        }
    }

    fn scene(&self) -> Scene {
        match self.current() {
            Some(index) => self.render_question(index),
            None => self.render_results(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_correct_and_incorrect_answers() {
        let mut quiz = Quiz::new();
        let anim = quiz.answer(1);
        assert_eq!(anim.alert, Some((AlertLevel::Success, "Correct! Well done!".into())));
        assert_eq!(quiz.score(), 1);

        quiz.next();
        let anim = quiz.answer(0);
        assert_eq!(anim.alert, Some((AlertLevel::Danger, "Incorrect! Try again.".into())));
        assert_eq!(quiz.score(), 1);
    }

    #[test]
    fn test_second_answer_is_ignored() {
        let mut quiz = Quiz::new();
        quiz.answer(0);
        let again = quiz.answer(1);
        assert!(again.alert.is_none());
        assert_eq!(quiz.score(), 0);
    }

    #[test]
    fn test_marks_correct_and_picked_options() {
        let mut quiz = Quiz::new();
        quiz.answer(3);
        let scene = quiz.scene();
        assert_eq!(scene.find_tone("2. O(1)"), Some(Tone::Found));
        assert_eq!(scene.find_tone("4. O(n²)"), Some(Tone::Removing));
        assert_eq!(scene.find_tone("1. O(n)"), Some(Tone::Plain));
    }

    #[test]
    fn test_results_after_last_question() {
        let mut quiz = Quiz::new();
        for q in QUESTIONS.iter().take(3) {
            quiz.answer(q.correct);
            quiz.next();
        }
        quiz.next();
        quiz.next();
        assert!(quiz.is_finished());
        assert_eq!(quiz.percentage(), 60.0);

        let scene = quiz.scene();
        let has_score = scene.shapes.iter().any(|s| {
            matches!(s, crate::scene::Shape::Text { text, .. } if text == "Your score: 3/5 (60.0%)")
        });
        assert!(has_score);

        // no-ops until restart
        assert!(quiz.answer(1).alert.is_none());
        quiz.next();
        assert!(quiz.is_finished());

        quiz.reset();
        assert_eq!(quiz.current(), Some(0));
        assert_eq!(quiz.score(), 0);
    }

    #[test]
    fn test_wrap_fits_width() {
        let lines = wrap_text(QUESTIONS[0].text, 40);
        assert!(lines.len() > 1);
        assert!(lines.iter().all(|l| l.chars().count() <= 40));
    }
}
