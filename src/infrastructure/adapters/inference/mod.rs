//! Inference Adapter - 推理管线实现
//!
//! 按配置构建四个模型管线，启动时调用一次

mod device;
mod fake_pipelines;
mod http_pipelines;

use std::sync::Arc;

pub use device::{cuda_available, resolve_device, select_device};
pub use fake_pipelines::{
    FakeAsrPipeline, FakeQaPipeline, FakeSummarizationPipeline, FakeTranslationPipeline,
};
pub use http_pipelines::*;

use crate::application::ports::{Device, InferenceError, InferencePipelines};
use crate::config::{BackendKind, InferenceConfig};

/// 构建配置指定的推理后端
///
/// 失败时应终止启动
pub fn build_pipelines(
    config: &InferenceConfig,
    device: Device,
) -> Result<InferencePipelines, InferenceError> {
    let pipelines = match config.backend {
        BackendKind::Http => {
            let client_config = HttpInferenceClientConfig::new(&config.base_url)
                .with_timeout(config.timeout_secs);
            let client = Arc::new(HttpInferenceClient::new(client_config)?);

            InferencePipelines {
                asr: Arc::new(HttpAsrPipeline::new(
                    client.clone(),
                    &config.asr_model,
                    device,
                    &config.asr_language,
                )),
                translation: Arc::new(HttpTranslationPipeline::new(
                    client.clone(),
                    &config.translation_model,
                )),
                qa: Arc::new(HttpQaPipeline::new(client.clone(), &config.qa_model)),
                summarization: Arc::new(HttpSummarizationPipeline::new(
                    client,
                    &config.summarization_model,
                )),
            }
        }
        BackendKind::Fake => InferencePipelines {
            asr: Arc::new(FakeAsrPipeline::new(
                &config.asr_model,
                &config.fake_transcript,
            )),
            translation: Arc::new(FakeTranslationPipeline::new(&config.translation_model)),
            qa: Arc::new(FakeQaPipeline::new(&config.qa_model)),
            summarization: Arc::new(FakeSummarizationPipeline::new(
                &config.summarization_model,
            )),
        },
    };

    tracing::info!(
        backend = %config.backend,
        device = %device,
        "Inference pipelines ready"
    );

    Ok(pipelines)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_build_fake_pipelines() {
        let config = InferenceConfig {
            backend: BackendKind::Fake,
            ..Default::default()
        };
        let pipelines = build_pipelines(&config, Device::Cpu).unwrap();

        assert_eq!(pipelines.qa.model_id(), "deepset/roberta-base-squad2");
        assert!(pipelines.unhealthy_models().await.is_empty());
    }

    #[test]
    fn test_build_http_pipelines() {
        let config = InferenceConfig::default();
        let pipelines = build_pipelines(&config, Device::Cpu).unwrap();
        assert_eq!(
            pipelines.asr.model_id(),
            "facebook/wav2vec2-large-robust-ft-libri-960h"
        );
        assert_eq!(pipelines.summarization.model_id(), "facebook/bart-large-cnn");
    }
}
