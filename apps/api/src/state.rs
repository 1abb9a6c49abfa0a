use std::sync::Arc;

use tracing::{info, warn};

use appointment_cell::{AppointmentState, SupabaseAppointmentsRepository};
use notification_cell::SupabaseNotificationsRepository;
use shared_cache::{CacheProvider, InMemoryCacheProvider, RedisCacheProvider};
use shared_config::{AppConfig, StorageDriver, UploadConfig};
use storage_cell::DiskStorageProvider;

/// Supabase-backed repositories when Supabase is configured, in-memory otherwise.
pub async fn build_state(config: Arc<AppConfig>) -> AppointmentState {
    let cache = build_cache(&config).await;

    if config.is_supabase_configured() {
        info!("Using Supabase repositories at {}", config.supabase_url);
        AppointmentState::new(
            Arc::clone(&config),
            Arc::new(SupabaseAppointmentsRepository::new(&config)),
            Arc::new(SupabaseNotificationsRepository::new(&config)),
            cache,
        )
    } else {
        warn!("Supabase is not configured, appointments are kept in memory");
        let state = AppointmentState::in_memory(config);
        AppointmentState { cache, ..state }
    }
}

async fn build_cache(config: &AppConfig) -> Arc<dyn CacheProvider> {
    let Some(redis_url) = config.redis_url.as_deref() else {
        info!("REDIS_URL not set, using in-memory cache");
        return Arc::new(InMemoryCacheProvider::new());
    };

    match RedisCacheProvider::connect(redis_url).await {
        Ok(redis) => {
            info!("Connected to Redis cache");
            Arc::new(redis)
        }
        Err(e) => {
            warn!("Redis unavailable ({}), falling back to in-memory cache", e);
            Arc::new(InMemoryCacheProvider::new())
        }
    }
}

/// Creates the staging and uploads folders for the disk driver.
pub async fn prepare_uploads(upload: &UploadConfig) -> anyhow::Result<()> {
    match upload.driver {
        StorageDriver::Disk => {
            DiskStorageProvider::new(upload).ensure_folders().await?;
            info!("Uploads staged in {}", upload.tmp_folder.display());
        }
        StorageDriver::S3 => {
            warn!("Storage driver s3 selected for bucket {}, no local upload folders created", upload.aws_bucket);
        }
    }
    Ok(())
}
