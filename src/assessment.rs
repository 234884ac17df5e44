// Self-report assessment scales
//
// Fixed, publicly known questionnaires: score is a plain sum of the
// answers, level is a range lookup. Nothing here diagnoses anything.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScaleType {
    #[serde(rename = "phq_9")]
    Phq9,
    #[serde(rename = "gad_7")]
    Gad7,
    #[serde(rename = "pss_10")]
    Pss10,
}

impl ScaleType {
    pub fn from_slug(slug: &str) -> Option<Self> {
        match slug {
            "phq_9" | "phq9" => Some(Self::Phq9),
            "gad_7" | "gad7" => Some(Self::Gad7),
            "pss_10" | "pss10" => Some(Self::Pss10),
            _ => None,
        }
    }
}

/// Static definition of one scale.
pub struct ScaleDef {
    pub title: &'static str,
    pub description: &'static str,
    pub questions: &'static [&'static str],
    pub options: &'static [&'static str],
    /// Inclusive score ranges mapped to level labels.
    pub levels: &'static [(u32, u32, &'static str)],
}

#[derive(Debug, Error, PartialEq)]
pub enum AssessmentError {
    #[error("expected {expected} answers, got {got}")]
    WrongAnswerCount { expected: usize, got: usize },

    #[error("answer {index} out of range: max option index is {max}")]
    AnswerOutOfRange { index: usize, max: u32 },
}

/// Scored submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentResult {
    pub scale: ScaleType,
    pub score: u32,
    pub level: String,
}

const PHQ_9: ScaleDef = ScaleDef {
    title: "患者健康问卷-9项 (PHQ-9)",
    description: "评估您最近两周的抑郁症状",
    questions: &[
        "做事时提不起劲或没有兴趣",
        "感到心情低落、沮丧或绝望",
        "入睡困难、睡不安稳或睡眠过多",
        "感到疲倦或没有活力",
        "食欲不振或吃得太多",
        "觉得自己很糟，或觉得自己很失败，让自己或家人失望",
        "对事物专注有困难，例如阅读报纸或看电视时",
        "动作、说话速度缓慢到别人已经察觉，或正好相反，烦躁或坐立不安",
        "有不如死掉或用某种方式伤害自己的念头",
    ],
    options: &["完全不会", "好几天", "一半以上的天数", "几乎每天"],
    levels: &[
        (0, 4, "无抑郁"),
        (5, 9, "轻度抑郁"),
        (10, 14, "中度抑郁"),
        (15, 19, "中重度抑郁"),
        (20, 27, "重度抑郁"),
    ],
};

const GAD_7: ScaleDef = ScaleDef {
    title: "广泛性焦虑障碍-7项 (GAD-7)",
    description: "评估您最近两周的焦虑症状",
    questions: &[
        "感到紧张、焦虑或急切",
        "不能停止或控制担忧",
        "对各种各样的事情担忧过多",
        "很难放松下来",
        "由于不安而无法静坐",
        "变得容易烦恼或急躁",
        "感到好像有什么可怕的事发生",
    ],
    options: &["完全不会", "好几天", "一半以上的天数", "几乎每天"],
    levels: &[
        (0, 4, "无焦虑"),
        (5, 9, "轻度焦虑"),
        (10, 14, "中度焦虑"),
        (15, 21, "重度焦虑"),
    ],
};

const PSS_10: ScaleDef = ScaleDef {
    title: "感知压力量表-10项 (PSS-10)",
    description: "评估您最近一个月的压力水平",
    questions: &[
        "因意外发生的事情而心烦意乱",
        "感觉无法控制生活中的重要事情",
        "感觉神经紧张，压力很大",
        "感到自信心不足以处理个人问题",
        "感觉事情并非按预期发展",
        "发现自己无法应付所有必须做的事情",
        "因为事情超出控制而愤怒",
        "感觉问题堆积如山，无法克服",
        "感到生活中有很多事情让你感到压力",
        "发现自己对一些小事反应过度",
    ],
    options: &["从不", "几乎从不", "有时", "经常", "很经常"],
    levels: &[(0, 13, "低压力"), (14, 26, "中等压力"), (27, 40, "高压力")],
};

pub fn scale(scale_type: ScaleType) -> &'static ScaleDef {
    match scale_type {
        ScaleType::Phq9 => &PHQ_9,
        ScaleType::Gad7 => &GAD_7,
        ScaleType::Pss10 => &PSS_10,
    }
}

/// Validate and score a submission.
pub fn score(scale_type: ScaleType, answers: &[u32]) -> Result<AssessmentResult, AssessmentError> {
    let def = scale(scale_type);

    if answers.len() != def.questions.len() {
        return Err(AssessmentError::WrongAnswerCount {
            expected: def.questions.len(),
            got: answers.len(),
        });
    }

    let max_option = (def.options.len() - 1) as u32;
    for (index, &answer) in answers.iter().enumerate() {
        if answer > max_option {
            return Err(AssessmentError::AnswerOutOfRange {
                index,
                max: max_option,
            });
        }
    }

    let total: u32 = answers.iter().sum();
    // Validation bounds the sum inside the top level range
    let level = def
        .levels
        .iter()
        .find(|(min, max, _)| (*min..=*max).contains(&total))
        .map(|(_, _, label)| (*label).to_string())
        .unwrap_or_default();

    Ok(AssessmentResult {
        scale: scale_type,
        score: total,
        level,
    })
}
