/// Starter catalog written by `init_data_dir`, as (relative path, contents).
pub const FILES: [(&str, &str); 5] = [
    ("settings.json", SETTINGS),
    ("tags.json", TAGS),
    ("tag-order.json", TAG_ORDER),
    ("templates/serverless-web-app.json", SERVERLESS_WEB_APP),
    ("templates/az-104-storage-lab.json", STORAGE_LAB),
];

pub const SETTINGS: &str = r#"{
  "baseUrl": "/",
  "colorMode": "light",
  "assetPlaceholder": "/img/placeholder.svg"
}
"#;

pub const TAGS: &str = r#"{
  "azurefunctions": {
    "label": "Azure Functions",
    "description": "Event-driven serverless compute.",
    "type": "Service",
    "url": "https://learn.microsoft.com/azure/azure-functions/",
    "azureIcon": "/img/Azure-Functions.svg"
  },
  "azurestorage": {
    "label": "Azure Storage",
    "description": "Durable, highly available cloud storage.",
    "type": "Service",
    "url": "https://learn.microsoft.com/azure/storage/",
    "azureIcon": "/img/Azure-Storage.svg",
    "darkModeAzureIcon": "/img/Azure-Storage-Dark.svg"
  },
  "bicep": {
    "label": "Bicep",
    "description": "Infrastructure as code language for Azure.",
    "type": "Infrastructure as Code",
    "url": "https://learn.microsoft.com/azure/azure-resource-manager/bicep/"
  },
  "az-104": {
    "label": "AZ-104",
    "description": "Microsoft Azure Administrator",
    "type": "ILT Courses",
    "url": "https://learn.microsoft.com/training/courses/az-104t00",
    "courseblueprint": "https://aka.ms/az104blueprint",
    "courseblueprintdiag": "/img/az104blueprint.png"
  }
}
"#;

pub const TAG_ORDER: &str = r#"[
  "az-104",
  "azurefunctions",
  "azurestorage",
  "bicep"
]
"#;

pub const SERVERLESS_WEB_APP: &str = r#"{
  "title": "Serverless Web App",
  "description": "A static front end backed by Azure Functions and Storage.",
  "preview": "/img/serverless-web-app.png",
  "author": "Trainer Demo Deploy",
  "source": "https://github.com/Example-Org/Serverless-Web-App",
  "tags": ["bicep", "azurestorage", "azurefunctions"],
  "cost": "0.50",
  "deploytime": "8",
  "demoguide": "https://raw.githubusercontent.com/example-org/serverless-web-app/main/demoguide/demoguide.md"
}
"#;

pub const STORAGE_LAB: &str = r#"{
  "title": "AZ-104 Storage Lab",
  "description": "Storage accounts, blob containers and file shares for the administrator course.",
  "preview": "/img/az-104-storage-lab.png",
  "author": "Trainer Demo Deploy, Example Trainer",
  "source": "https://github.com/Example-Org/AZ104-Storage-Lab",
  "tags": ["azurestorage", "az-104"],
  "cost": "1.20",
  "deploytime": "12",
  "prereqs": "https://github.com/Example-Org/AZ104-Storage-Lab/blob/main/prereqs.md"
}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CanonicalTagOrder, SiteSettings, TagRegistry, TemplateRecord};

    #[test]
    fn starter_files_parse() {
        let _: SiteSettings = serde_json::from_str(SETTINGS).unwrap();
        let registry: TagRegistry = serde_json::from_str(TAGS).unwrap();
        let order: CanonicalTagOrder = serde_json::from_str(TAG_ORDER).unwrap();
        assert_eq!(registry.len(), order.len());
        for raw in [SERVERLESS_WEB_APP, STORAGE_LAB] {
            let record: TemplateRecord = serde_json::from_str(raw).unwrap();
            assert!(record.tags.iter().all(|t| registry.contains(t)));
        }
    }
}
