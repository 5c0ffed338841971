use std::io::Write;
use zip::write::{FileOptions, ZipWriter};

use crate::core::orchestrator::Orchestrator;
use crate::core::presenter::{OutputView, Presenter};
use crate::domain::model::DesignInputs;
use crate::domain::ports::{GenerationService, Storage};
use crate::utils::error::Result;
use crate::utils::monitor::GenerationMonitor;

const BUNDLE_FILENAME: &str = "design_package.zip";

/// 驅動 收集 → 生成 → 匯出 的引擎
pub struct DesignEngine<G: GenerationService, S: Storage> {
    orchestrator: Orchestrator<G>,
    presenter: Presenter,
    storage: S,
    bundle: bool,
    monitor: GenerationMonitor,
}

impl<G: GenerationService, S: Storage> DesignEngine<G, S> {
    pub fn new(service: G, storage: S, bundle: bool) -> Self {
        Self::new_with_monitoring(service, storage, bundle, false)
    }

    pub fn new_with_monitoring(service: G, storage: S, bundle: bool, monitor: bool) -> Self {
        Self {
            orchestrator: Orchestrator::new(service),
            presenter: Presenter::new(),
            storage,
            bundle,
            monitor: GenerationMonitor::new(monitor),
        }
    }

    pub fn orchestrator(&self) -> &Orchestrator<G> {
        &self.orchestrator
    }

    pub fn presenter(&self) -> &Presenter {
        &self.presenter
    }

    /// 執行一次完整的設計生成，回傳寫出的檔案名稱
    pub async fn run(&mut self, inputs: &DesignInputs) -> Result<Vec<String>> {
        self.monitor.log_stats("Dispatch");

        let outputs = self.orchestrator.generate(inputs).await?.clone();
        self.monitor.log_stats("Generation complete");

        let csv_text = self.presenter.export_boq_csv(&outputs.boq)?;
        let cross_section = self.presenter.export_image(&outputs.cross_section)?;
        let model_3d = self.presenter.export_image(&outputs.model_3d)?;

        let mut written = Vec::new();
        for (view, bytes) in [
            (OutputView::Quantities, csv_text.into_bytes()),
            (OutputView::CrossSection, cross_section),
            (OutputView::Model3d, model_3d),
        ] {
            let filename = view.export_filename();
            tracing::debug!("💾 Writing {} ({} bytes)", filename, bytes.len());
            self.storage.write_file(filename, &bytes).await?;
            written.push(filename.to_string());
        }

        if self.bundle {
            let bundle = self.build_bundle(inputs, &written).await?;
            tracing::debug!("📦 Writing {} ({} bytes)", BUNDLE_FILENAME, bundle.len());
            self.storage.write_file(BUNDLE_FILENAME, &bundle).await?;
            written.push(BUNDLE_FILENAME.to_string());
        }

        self.monitor.log_final_stats();
        Ok(written)
    }

    /// 將三份輸出連同設計清單打包成單一 ZIP
    async fn build_bundle(&self, inputs: &DesignInputs, filenames: &[String]) -> Result<Vec<u8>> {
        let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));

        for filename in filenames {
            let data = self.storage.read_file(filename).await?;
            zip.start_file::<_, ()>(filename.as_str(), FileOptions::default())?;
            zip.write_all(&data)?;
        }

        let manifest = serde_json::json!({
            "generated_at": chrono::Utc::now().to_rfc3339(),
            "design": inputs,
        });
        zip.start_file::<_, ()>("manifest.json", FileOptions::default())?;
        zip.write_all(serde_json::to_string_pretty(&manifest)?.as_bytes())?;

        let cursor = zip.finish()?;
        Ok(cursor.into_inner())
    }
}
