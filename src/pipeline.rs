use crate::catalog::EmojiCatalog;
use crate::history::History;
use crate::model::CommentaryModel;
use crate::parser::parse_commentary;
use crate::types::{Commentary, CriticError, HistoryEntry, Result};
use chrono::Utc;
use tracing::{debug, error, info};
use uuid::Uuid;

/// Default prompt template instructing the model to answer with the
/// four-key JSON commentary format.
pub const DEFAULT_PROMPT: &str = r#"你是一个精通网络抽象梗文化的锐评生成器。请根据用户提供的**两个emoji组合**，用以下JSON格式输出尖锐幽默的冒犯式锐评。

# 输出格式
{
  "组合": "用户提供的emoji",
  "解读": "用10字内解构该组合的本质",
  "锐评": "一句话锐评，需出现至少一个当代网络/生活黑话",
  "补刀": "括号内小字嘲讽，带比喻式羞辱"
}

# 风格规则
1. **短狠毒**：每条内容不超过一行，禁用形容词堆砌
2. **现实锚点**：必须捆绑具体生活场景（例：租房、加班、彩礼、炒股）
3. **类比公式**："像XX一样YY" 或 "XX的YY，YY的ZZ"
4. **黑话库**：优先使用「赛博功德、提肛、氪金、电子烧香、无效自律、破防流水线」等词

# 禁律
- 禁止使用"可能""或许"等暧昧词汇
- 禁止教育用户
- 禁止超过15个字以上的句子

# 示例
{
  "组合": "🏠+💸",
  "解读": "房贷式呼吸",
  "锐评": "房子在吸你寿，公积金在做法事",
  "补刀": "(建议把房产证烧了，能暖和点)"
}"#;

/// Where the pipeline currently is in a generation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    Requesting,
    Done,
    Failed,
}

/// Puts the pipeline back to `Idle` if the attempt future is dropped
/// mid-await (e.g. the caller raced it against a timeout); released before
/// the final state is set on a completed attempt.
struct InFlightReset<'a> {
    state: &'a mut PipelineState,
}

impl<'a> InFlightReset<'a> {
    fn release(self) {
        std::mem::forget(self);
    }
}

impl Drop for InFlightReset<'_> {
    fn drop(&mut self) {
        *self.state = PipelineState::Idle;
    }
}

/// The request -> parse -> record flow for one emoji pairing.
///
/// At most one attempt is in flight at a time; the pipeline owns the attempt
/// history and the currently displayed result, nothing else.
pub struct CommentaryPipeline<M: CommentaryModel> {
    model: M,
    history: History,
    state: PipelineState,
    current: Option<Commentary>,
    last_error: Option<String>,
}

impl<M: CommentaryModel> CommentaryPipeline<M> {
    pub fn new(model: M) -> Self {
        Self {
            model,
            history: History::new(),
            state: PipelineState::Idle,
            current: None,
            last_error: None,
        }
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn current_result(&self) -> Option<&Commentary> {
        self.current.as_ref()
    }

    /// The message of the most recent failure, retained until the next
    /// attempt starts.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Newest-first log of every attempt made past the entry guard.
    pub fn history(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.history.entries()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Dismisses the currently shown result without touching history.
    pub fn clear_current_result(&mut self) {
        self.current = None;
        if self.state == PipelineState::Done {
            self.state = PipelineState::Idle;
        }
    }

    /// Runs one generation attempt for the pair.
    ///
    /// Returns `Ok(None)` without any side effect when either id is empty or
    /// unknown to the catalog: an incomplete selection is a precondition
    /// failure, not an error to surface. A call made while a prior attempt
    /// is still in flight fails fast with `Busy`. Every attempt past the
    /// guard is recorded in history, failures included.
    pub async fn generate(
        &mut self,
        catalog: &EmojiCatalog,
        left_id: &str,
        right_id: &str,
        template: &str,
    ) -> Result<Option<Commentary>> {
        if left_id.is_empty() || right_id.is_empty() {
            debug!("Generation skipped: selection incomplete");
            return Ok(None);
        }

        let (left_label, right_label) = match (catalog.label_of(left_id), catalog.label_of(right_id))
        {
            (Some(l), Some(r)) => (l.to_string(), r.to_string()),
            _ => {
                debug!(
                    "Generation skipped: unknown emoji id in pair ({}, {})",
                    left_id, right_id
                );
                return Ok(None);
            }
        };

        if self.state == PipelineState::Requesting {
            return Err(CriticError::Busy);
        }

        self.state = PipelineState::Requesting;
        self.current = None;
        self.last_error = None;

        let combined_url = catalog
            .resolve(left_id, right_id)
            .map(|v| v.g_static_url.clone());

        let user_message = format!("「{}」+「{}」", left_label, right_label);
        info!(
            "Requesting commentary from {} for {}",
            self.model.model_name(),
            user_message
        );

        let outcome = {
            let reset = InFlightReset {
                state: &mut self.state,
            };
            let outcome = match self.model.complete(template, &user_message).await {
                Ok(payload) => parse_commentary(&payload),
                Err(e) => Err(e),
            };
            reset.release();
            outcome
        };

        let entry = HistoryEntry {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            left_emoji: left_id.to_string(),
            right_emoji: right_id.to_string(),
            combined_url,
            prompt: template.to_string(),
            result: outcome.as_ref().ok().cloned(),
        };
        self.history.record(entry);

        match outcome {
            Ok(commentary) => {
                info!("Commentary generated for pair ({}, {})", left_id, right_id);
                self.current = Some(commentary.clone());
                self.state = PipelineState::Done;
                Ok(Some(commentary))
            }
            Err(e) => {
                error!(
                    "Commentary generation failed for pair ({}, {}): {}",
                    left_id, right_id, e
                );
                self.last_error = Some(e.to_string());
                self.state = PipelineState::Failed;
                Err(e)
            }
        }
    }
}
