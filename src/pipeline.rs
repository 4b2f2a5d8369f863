//! The generate → fan out → merge sequence behind every gallery refresh.

use crate::{
    error::Result,
    genai::Generator,
    logger,
    models::{DisplayItem, ImageOptions},
};
use futures::future::try_join_all;
use std::sync::Arc;

pub const IDEA_COUNT: usize = 6;

pub fn ideas_prompt(count: usize) -> String {
    format!(
        "Generate {count} innovative and visionary concepts for technologies, products or \
         societal changes that could exist in the future. For each concept provide a short, \
         catchy title, a description of 2-3 sentences explaining what it is and why it \
         matters, and a detailed, vivid prompt for an image generator that illustrates the \
         concept in a photorealistic, cinematic style."
    )
}

/// Runs one all-or-nothing generation: ideas, then one image per idea, then merge.
pub struct Pipeline<G> {
    generator: Arc<G>,
    idea_count: usize,
    image_options: ImageOptions,
}

impl<G: Generator> Pipeline<G> {
    pub fn new(generator: Arc<G>) -> Self {
        Self {
            generator,
            idea_count: IDEA_COUNT,
            image_options: ImageOptions::default(),
        }
    }

    pub fn with_idea_count(mut self, count: usize) -> Self {
        self.idea_count = count;
        self
    }

    pub fn generator(&self) -> &Arc<G> {
        &self.generator
    }

    /// The first failure anywhere aborts the run. Image requests still in
    /// flight at that point are dropped and their results never observed.
    pub async fn run(&self) -> Result<Vec<DisplayItem>> {
        let _timer = logger::timer("pipeline");

        let ideas = self
            .generator
            .generate_ideas(&ideas_prompt(self.idea_count))
            .await?;
        if ideas.len() != self.idea_count {
            log::warn!(
                "Asked for {} ideas, received {}",
                self.idea_count,
                ideas.len()
            );
        }
        log::info!("Received {} ideas, generating images", ideas.len());

        // try_join_all yields results in input order, whatever order they finish in.
        let images = try_join_all(ideas.iter().map(|idea| {
            self.generator
                .generate_image(&idea.image_prompt, &self.image_options)
        }))
        .await?;

        Ok(ideas
            .into_iter()
            .zip(images)
            .map(|(idea, image)| DisplayItem::from_idea(idea, image.to_data_uri()))
            .collect())
    }
}
