#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use futuregen::{
    GeneratedImage, GenerationError, Generator, Idea, ImageOptions, Result as GenResult,
};
use tokio::sync::oneshot;

pub fn init_logging() {
    futuregen::logger::init_for_tests();
}

pub fn idea(tag: &str) -> Idea {
    Idea {
        title: format!("Title {}", tag),
        description: format!("Description {}", tag),
        image_prompt: format!("prompt-{}", tag),
    }
}

pub fn ideas(tags: &[&str]) -> Vec<Idea> {
    tags.iter().map(|tag| idea(tag)).collect()
}

/// The data URI the fakes produce for an image prompt.
pub fn image_uri_for(prompt: &str) -> String {
    GeneratedImage::new(prompt.as_bytes().to_vec(), "image/jpeg").to_data_uri()
}

#[derive(Clone)]
pub enum ImageBehaviour {
    Succeed { delay: Duration },
    Fail { delay: Duration },
}

/// Scripted generator: fixed idea batch, per-prompt image delays and failures.
pub struct ScriptedGenerator {
    ideas: Mutex<Option<GenResult<Vec<Idea>>>>,
    images: HashMap<String, ImageBehaviour>,
    pub image_calls: Mutex<Vec<(String, ImageOptions)>>,
    pub idea_prompts: Mutex<Vec<String>>,
}

impl ScriptedGenerator {
    pub fn new(ideas: GenResult<Vec<Idea>>) -> Self {
        Self {
            ideas: Mutex::new(Some(ideas)),
            images: HashMap::new(),
            image_calls: Mutex::new(Vec::new()),
            idea_prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn with_image(mut self, prompt: &str, behaviour: ImageBehaviour) -> Self {
        self.images.insert(prompt.to_string(), behaviour);
        self
    }

    pub fn image_call_count(&self) -> usize {
        self.image_calls.lock().unwrap().len()
    }
}

#[async_trait]
impl Generator for ScriptedGenerator {
    async fn generate_ideas(&self, prompt: &str) -> GenResult<Vec<Idea>> {
        self.idea_prompts.lock().unwrap().push(prompt.to_string());
        self.ideas
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| Err(GenerationError::Transport("script exhausted".into())))
    }

    async fn generate_image(
        &self,
        prompt: &str,
        options: &ImageOptions,
    ) -> GenResult<GeneratedImage> {
        self.image_calls
            .lock()
            .unwrap()
            .push((prompt.to_string(), options.clone()));

        let behaviour = self.images.get(prompt).cloned().unwrap_or(ImageBehaviour::Succeed {
            delay: Duration::ZERO,
        });
        match behaviour {
            ImageBehaviour::Succeed { delay } => {
                tokio::time::sleep(delay).await;
                Ok(GeneratedImage::new(prompt.as_bytes().to_vec(), "image/jpeg"))
            }
            ImageBehaviour::Fail { delay } => {
                tokio::time::sleep(delay).await;
                Err(GenerationError::Service {
                    status: 500,
                    message: format!("image failed for {}", prompt),
                })
            }
        }
    }
}

/// Idea batches released by the test, one per `generate_ideas` call, in call order.
pub struct GatedGenerator {
    gates: Mutex<VecDeque<oneshot::Receiver<GenResult<Vec<Idea>>>>>,
    pub settled_calls: Mutex<usize>,
}

impl GatedGenerator {
    pub fn new(count: usize) -> (Self, Vec<oneshot::Sender<GenResult<Vec<Idea>>>>) {
        let mut senders = Vec::with_capacity(count);
        let mut receivers = VecDeque::with_capacity(count);
        for _ in 0..count {
            let (tx, rx) = oneshot::channel();
            senders.push(tx);
            receivers.push_back(rx);
        }
        (
            Self {
                gates: Mutex::new(receivers),
                settled_calls: Mutex::new(0),
            },
            senders,
        )
    }
}

#[async_trait]
impl Generator for GatedGenerator {
    async fn generate_ideas(&self, _prompt: &str) -> GenResult<Vec<Idea>> {
        let gate = self.gates.lock().unwrap().pop_front();
        let result = match gate {
            Some(gate) => gate
                .await
                .unwrap_or_else(|_| Err(GenerationError::Transport("gate dropped".into()))),
            None => Err(GenerationError::Transport("no gate left".into())),
        };
        *self.settled_calls.lock().unwrap() += 1;
        result
    }

    async fn generate_image(
        &self,
        prompt: &str,
        _options: &ImageOptions,
    ) -> GenResult<GeneratedImage> {
        Ok(GeneratedImage::new(prompt.as_bytes().to_vec(), "image/jpeg"))
    }
}
