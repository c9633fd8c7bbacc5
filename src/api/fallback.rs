//! Bundled datasets served when neither the API nor the cache can answer.

use serde_json::{json, Value};

/// Resource types exposed by the portfolio API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Resource {
  Profile,
  Projects,
  ProjectCategories,
  Skills,
  SkillCategories,
  Experience,
  Education,
  Certificates,
  CertificateCategories,
  SocialLinks,
  BlogCategories,
  BlogPosts,
  Settings,
  HomeContent,
  AboutContent,
}

impl Resource {
  pub const ALL: [Resource; 15] = [
    Resource::Profile,
    Resource::Projects,
    Resource::ProjectCategories,
    Resource::Skills,
    Resource::SkillCategories,
    Resource::Experience,
    Resource::Education,
    Resource::Certificates,
    Resource::CertificateCategories,
    Resource::SocialLinks,
    Resource::BlogCategories,
    Resource::BlogPosts,
    Resource::Settings,
    Resource::HomeContent,
    Resource::AboutContent,
  ];

  /// Collection (or singleton) endpoint for this resource.
  pub fn endpoint(self) -> &'static str {
    match self {
      Resource::Profile => "/profile",
      Resource::Projects => "/projects",
      Resource::ProjectCategories => "/projects/categories",
      Resource::Skills => "/skills",
      Resource::SkillCategories => "/skill-categories",
      Resource::Experience => "/experience",
      Resource::Education => "/education",
      Resource::Certificates => "/certificates",
      Resource::CertificateCategories => "/certificate-categories",
      Resource::SocialLinks => "/social-links",
      Resource::BlogCategories => "/blog-categories",
      Resource::BlogPosts => "/blog-posts",
      Resource::Settings => "/settings",
      Resource::HomeContent => "/home-content",
      Resource::AboutContent => "/about-content",
    }
  }

  /// Singletons are served as one object rather than a list.
  pub fn is_singleton(self) -> bool {
    matches!(
      self,
      Resource::Profile | Resource::Settings | Resource::HomeContent | Resource::AboutContent
    )
  }

  /// The bundled fallback dataset for this resource.
  pub fn fallback(self) -> Value {
    match self {
      Resource::Profile => profile(),
      Resource::Projects => projects(),
      Resource::ProjectCategories => project_categories(),
      Resource::Skills => skills(),
      Resource::SkillCategories => skill_categories(),
      Resource::Experience => experience(),
      Resource::Education => education(),
      Resource::Settings => settings(),
      Resource::HomeContent => home_content(),
      Resource::AboutContent => about_content(),
      Resource::Certificates => certificates(),
      Resource::CertificateCategories => certificate_categories(),
      Resource::SocialLinks => social_links(),
      Resource::BlogCategories | Resource::BlogPosts => json!([]),
    }
  }
}

/// Item of a collection fallback whose `field` equals `value`, or `null`.
pub fn find_item(resource: Resource, field: &str, value: &Value) -> Value {
  match resource.fallback() {
    Value::Array(items) => items
      .into_iter()
      .find(|item| item.get(field) == Some(value))
      .unwrap_or(Value::Null),
    _ => Value::Null,
  }
}

fn profile() -> Value {
  json!({
    "id": 1,
    "fullName": "Eka Syarif Maulana",
    "greeting": "Selamat Datang",
    "role": "[\"Developer\",\"Designer\"]",
    "bio": "",
    "heroImage": null,
    "aboutImage": null,
    "resumeUrl": "",
    "location": "Medan",
    "email": "",
    "phone": "",
    "stats_project_count": "29",
    "stats_exp_years": "5",
    "map_embed_url": null,
    "total_certificates": 12,
    "total_skills": 22
  })
}

fn projects() -> Value {
  json!([
    {
      "id": 44,
      "title": "Mobile Apps Project 1: Beta System",
      "description": concat!(
        "A high-performance mobile apps solution designed to optimize workflow ",
        "and enhance user productivity."
      ),
      "content": concat!(
        "<h3>About This Project</h3>",
        "<p>A sample project in the <strong>Mobile Apps</strong> domain.</p>"
      ),
      "thumbnail": "https://picsum.photos/seed/mobile-apps-1/800/600",
      "cover_image": null,
      "video_file": null,
      "images": [],
      "techStack": ["Python", "Django", "TypeScript", "Docker"],
      "category": 9,
      "category_details": {"id": 9, "name": "Mobile Apps", "slug": "mobile-apps"},
      "summaries": [],
      "demoUrl": "https://example.com/demo",
      "repoUrl": "https://github.com/example/repo",
      "video_url": null,
      "is_featured": true,
      "links": [],
      "order": 1,
      "createdAt": "2026-01-25T19:50:29.617379+07:00",
      "updatedAt": "2026-01-27T04:57:34.673705+07:00",
      "is_published": true,
      "publish_at": null
    }
  ])
}

fn project_categories() -> Value {
  json!([
    {"id": 9, "name": "Mobile Apps", "slug": "mobile-apps"}
  ])
}

fn skills() -> Value {
  let skill = |id: u64, name: &str, percentage: u64, category: (u64, &str, &str)| {
    json!({
      "id": id,
      "name": name,
      "percentage": percentage,
      "category": category.0,
      "category_details": {"id": category.0, "name": category.1, "slug": category.2}
    })
  };
  let frontend = (1, "Frontend Development", "frontend-development");
  let backend = (2, "Backend Development", "backend-development");

  json!([
    skill(1, "React", 61, frontend),
    skill(2, "Vue.js", 87, frontend),
    skill(6, "Python", 79, backend),
    skill(7, "Django", 86, backend),
  ])
}

fn skill_categories() -> Value {
  json!([
    {"id": 1, "name": "Frontend Development", "slug": "frontend-development"},
    {"id": 2, "name": "Backend Development", "slug": "backend-development"}
  ])
}

fn experience() -> Value {
  let description = "Responsible for backend API development, frontend integration, \
                     and mentoring junior developers.";
  json!([
    {
      "id": 12,
      "role": "Mid-Level Developer",
      "company": "Startup Inc 2",
      "description": description,
      "startDate": "2024-01-26",
      "endDate": "2024-11-21",
      "isCurrent": false,
      "location": "Remote"
    },
    {
      "id": 17,
      "role": "Mid-Level Developer",
      "company": "Startup Inc 7",
      "description": description,
      "startDate": "2019-01-27",
      "endDate": "2019-11-23",
      "isCurrent": false,
      "location": "Jakarta, Indonesia"
    }
  ])
}

fn education() -> Value {
  json!([
    {
      "id": 1,
      "institution": "Universitas Sumatera Utara",
      "degree": "Bachelor of Computer Science",
      "fieldOfStudy": "Computer Science",
      "startDate": "2017-08-01",
      "endDate": "2021-08-01",
      "description": "Graduated with honors.",
      "attachments": [],
      "gallery": []
    }
  ])
}

const CERTIFICATE_CATEGORIES: [(u64, &str, &str); 3] = [
  (1, "Course", "course"),
  (2, "Event", "event"),
  (3, "Seminar", "seminar"),
];

fn certificates() -> Value {
  // (title, issuer, issued, credential id, credential url, image, category slug)
  let rows = [
    (
      "Meta Frontend Developer Professional Certificate",
      "Meta (Coursera)",
      "2023-12-15",
      "ABC123XYZ",
      "https://coursera.org/verify/ABC123XYZ",
      "/certs/meta-frontend.jpg",
      "course",
    ),
    (
      "Google UX Design Certificate",
      "Google (Coursera)",
      "2023-08-20",
      "GUX789DEF",
      "https://coursera.org/verify/GUX789DEF",
      "/certs/google-ux.jpg",
      "course",
    ),
    (
      "HackFest 2023 - 2nd Place",
      "TechCommunity",
      "2023-10-05",
      "HF2023-002",
      "",
      "/certs/hackfest.jpg",
      "event",
    ),
    (
      "Web3 & Blockchain Summit",
      "Blockchain Indonesia",
      "2024-01-20",
      "WBS-2024-123",
      "",
      "/certs/web3-summit.jpg",
      "seminar",
    ),
  ];

  rows
    .iter()
    .zip(1u64..)
    .map(|(&(title, issuer, issued, credential, url, image, slug), id)| {
      let category = certificate_category(slug);
      json!({
        "id": id,
        "title": title,
        "issuer": issuer,
        "issueDate": issued,
        "expiryDate": null,
        "credentialId": credential,
        "credentialUrl": url,
        "imageUrl": image,
        "category": category["id"].clone(),
        "category_details": category
      })
    })
    .collect()
}

fn certificate_category(slug: &str) -> Value {
  CERTIFICATE_CATEGORIES
    .iter()
    .find(|(_, _, s)| *s == slug)
    .map(|(id, name, slug)| json!({"id": id, "name": name, "slug": slug}))
    .unwrap_or(Value::Null)
}

fn certificate_categories() -> Value {
  CERTIFICATE_CATEGORIES
    .iter()
    .map(|(id, name, slug)| json!({"id": id, "name": name, "slug": slug}))
    .collect()
}

fn social_links() -> Value {
  let link = |id: u64, platform: &str, handle: &str| {
    let icon = platform.to_lowercase();
    json!({
      "id": id,
      "platform": platform,
      "url": format!("https://{}.com/{}", icon, handle),
      "icon": icon
    })
  };

  json!([
    link(1, "GitHub", "ekasyarif"),
    link(2, "LinkedIn", "in/ekasyarif"),
    link(3, "Twitter", "ekasyarif"),
    link(4, "Instagram", "ekasyarif"),
    link(5, "Dribbble", "ekasyarif"),
  ])
}

fn settings() -> Value {
  json!({
    "id": 1,
    "theme": "dark",
    "seoTitle": "My Portfolio",
    "seoDesc": "Welcome to my portfolio website",
    "cdn_url": null,
    "maintenanceMode": false,
    "maintenance_end_time": null,
    "ai_provider": "gemini"
  })
}

fn home_content() -> Value {
  json!({
    "greeting_id": "Selamat Datang",
    "greeting_en": "Welcome",
    "roles_id": "[\"Developer\",\"Designer\"]",
    "roles_en": "[\"Developer\",\"Designer\"]",
    "heroImage": null
  })
}

fn about_content() -> Value {
  json!({
    "short_description_id": "",
    "short_description_en": "",
    "long_description_id": "",
    "long_description_en": "",
    "aboutImage": null
  })
}
