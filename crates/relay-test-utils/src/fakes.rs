//! Recording fakes for the research agent's collaborators.
//!
//! Each fake writes what it was asked to do into a shared [`Record`], which
//! the test keeps a handle to after the fakes move into the agent.

use relay_agents::{
    CollaboratorResult, Collaborators, Crawler, Embeddings, Inference, Inferer, Search, TokenUsage,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Everything the fakes observed, in call order.
#[derive(Debug, Default, Clone)]
pub struct Record {
    pub searches: Vec<String>,
    pub crawled: Vec<String>,
    pub indexed: Vec<PathBuf>,
    pub queries: Vec<String>,
    pub inferences: Vec<(String, String)>,
}

type Shared = Arc<Mutex<Record>>;

/// Builder for a set of fakes sharing one [`Record`].
#[derive(Debug, Clone)]
pub struct FakeCollaborators {
    record: Shared,
    search_results: Vec<String>,
    context: String,
    response: String,
    usage: TokenUsage,
    fail_search: bool,
}

impl Default for FakeCollaborators {
    fn default() -> Self {
        Self {
            record: Shared::default(),
            search_results: vec!["https://example.com/a".to_string()],
            context: "retrieved context".to_string(),
            response: "inferred answer".to_string(),
            usage: TokenUsage::new(12, 30),
            fail_search: false,
        }
    }
}

impl FakeCollaborators {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search_results(mut self, urls: &[&str]) -> Self {
        self.search_results = urls.iter().map(|u| u.to_string()).collect();
        self
    }

    pub fn with_response(mut self, response: &str, usage: TokenUsage) -> Self {
        self.response = response.to_string();
        self.usage = usage;
        self
    }

    pub fn failing_search(mut self) -> Self {
        self.fail_search = true;
        self
    }

    /// Snapshot of what the fakes have recorded so far.
    pub fn record(&self) -> Record {
        self.record.lock().unwrap().clone()
    }

    /// Box the fakes for a research agent. The builder keeps observing.
    pub fn build(&self) -> Collaborators {
        Collaborators {
            embeddings: Box::new(FakeEmbeddings {
                record: self.record.clone(),
                context: self.context.clone(),
            }),
            inferer: Box::new(FakeInferer {
                record: self.record.clone(),
                response: self.response.clone(),
                usage: self.usage,
            }),
            search: Box::new(FakeSearch {
                record: self.record.clone(),
                results: self.search_results.clone(),
                fail: self.fail_search,
            }),
            crawler: Box::new(FakeCrawler {
                record: self.record.clone(),
            }),
        }
    }
}

struct FakeEmbeddings {
    record: Shared,
    context: String,
}

impl Embeddings for FakeEmbeddings {
    fn index(&mut self, folder: &Path) -> CollaboratorResult<()> {
        self.record.lock().unwrap().indexed.push(folder.to_path_buf());
        Ok(())
    }

    fn retrieve_context(&self, query: &str) -> CollaboratorResult<String> {
        self.record.lock().unwrap().queries.push(query.to_string());
        Ok(self.context.clone())
    }
}

struct FakeInferer {
    record: Shared,
    response: String,
    usage: TokenUsage,
}

impl Inferer for FakeInferer {
    fn infer(&mut self, context: &str, problem: &str) -> CollaboratorResult<Inference> {
        self.record
            .lock()
            .unwrap()
            .inferences
            .push((context.to_string(), problem.to_string()));
        Ok(Inference {
            response: self.response.clone(),
            usage: self.usage,
        })
    }
}

struct FakeSearch {
    record: Shared,
    results: Vec<String>,
    fail: bool,
}

impl Search for FakeSearch {
    fn search(&self, term: &str) -> CollaboratorResult<Vec<String>> {
        self.record.lock().unwrap().searches.push(term.to_string());
        if self.fail {
            return Err("search backend unavailable".into());
        }
        Ok(self.results.clone())
    }
}

/// Writes one folder per URL, named after its last path segment.
struct FakeCrawler {
    record: Shared,
}

impl Crawler for FakeCrawler {
    fn crawl(&mut self, urls: &[String], destination: &Path) -> CollaboratorResult<()> {
        for url in urls {
            self.record.lock().unwrap().crawled.push(url.clone());
            let name = url.rsplit('/').next().unwrap_or("page");
            let folder = destination.join(name);
            fs::create_dir_all(&folder)?;
            fs::write(folder.join("index.md"), url)?;
        }
        Ok(())
    }
}
